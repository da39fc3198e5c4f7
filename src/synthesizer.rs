//! Text-to-bitmap rasterization for embroidery.
//!
//! `synthesize` is a pure function of the spec: it never touches the design
//! model, and for identical inputs it always produces a bitmap of identical
//! dimensions. Exact pixel content depends on the font outlines shipped with
//! egui and is not required to be bit-identical across platforms.

use ab_glyph::{Font, FontArc, ScaleFont};
use egui::{Color32, ColorImage, FontDefinitions};

use crate::design::{EmbroideryFont, EmbroiderySpec};
use crate::error::DesignError;
use crate::scene::parse_color;

/// Rasterization happens at this multiple of the requested size so the text
/// stays crisp on curved, zoomed surfaces.
pub const SUPERSAMPLE: f32 = 4.0;

/// Padding around the text, in requested-size pixels.
pub const PADDING: f32 = 16.0;

/// Canvas floor, in requested-size pixels. An empty spec still produces a
/// (blank) canvas of exactly this size.
pub const MIN_WIDTH: f32 = 64.0;
pub const MIN_HEIGHT: f32 = 64.0;

/// Radius of the dark halo stroked around the glyphs, in supersampled pixels.
const OUTLINE_RADIUS: i32 = 2;

const HALO_COLOR: Color32 = Color32::from_rgb(0x14, 0x12, 0x10);

/// Pure text rasterizer over the font faces embedded in egui, so no font
/// assets ship with this crate.
pub struct TextSynthesizer {
    proportional: FontArc,
    monospace: FontArc,
}

impl TextSynthesizer {
    /// Parses the embedded faces once. Fails with
    /// [`DesignError::SynthesisUnavailable`] when a face cannot be parsed;
    /// the caller reports that and continues without embroidery.
    pub fn new() -> Result<Self, DesignError> {
        let definitions = FontDefinitions::default();
        Ok(Self {
            proportional: load_face(&definitions, "Ubuntu-Light")?,
            monospace: load_face(&definitions, "Hack")?,
        })
    }

    /// Maps the enumerated font list onto the embedded faces. Arial and
    /// Georgia both resolve to the proportional face; Courier to the
    /// monospace one.
    fn face(&self, font: EmbroideryFont) -> &FontArc {
        match font {
            EmbroideryFont::Arial | EmbroideryFont::Georgia => &self.proportional,
            EmbroideryFont::Courier => &self.monospace,
        }
    }

    /// Measures the text, sizes the canvas as
    /// `max(min, text + 2 * padding) * supersample`, and rasterizes the text
    /// centered with a dark outline halo for legibility on any base color.
    pub fn synthesize(&self, spec: &EmbroiderySpec) -> Result<ColorImage, DesignError> {
        if !spec.size.is_finite() || spec.size <= 0.0 {
            return Err(DesignError::SynthesisUnavailable(format!(
                "invalid embroidery size {}",
                spec.size
            )));
        }

        let font = self.face(spec.font);
        let text_width = measure_width(font, &spec.text, spec.size);

        let canvas_w = (text_width + 2.0 * PADDING).max(MIN_WIDTH);
        let canvas_h = (spec.size + 2.0 * PADDING).max(MIN_HEIGHT);
        let px_w = (canvas_w * SUPERSAMPLE).ceil() as usize;
        let px_h = (canvas_h * SUPERSAMPLE).ceil() as usize;

        let mut coverage = vec![0.0f32; px_w * px_h];
        if !spec.text.is_empty() {
            rasterize_centered(font, &spec.text, spec.size * SUPERSAMPLE, px_w, px_h, &mut coverage);
        }

        let halo = dilate(&coverage, px_w, px_h, OUTLINE_RADIUS);
        Ok(compose(&coverage, &halo, px_w, px_h, parse_color(&spec.color)))
    }
}

fn load_face(definitions: &FontDefinitions, name: &str) -> Result<FontArc, DesignError> {
    let data = definitions.font_data.get(name).ok_or_else(|| {
        DesignError::SynthesisUnavailable(format!("embedded font `{name}` is missing"))
    })?;
    FontArc::try_from_vec(data.font.to_vec())
        .map_err(|err| DesignError::SynthesisUnavailable(format!("cannot parse `{name}`: {err}")))
}

/// Advance width of the text including kerning, at the given size.
fn measure_width(font: &FontArc, text: &str, size: f32) -> f32 {
    let scaled = font.as_scaled(size);
    let mut width = 0.0f32;
    let mut prev = None;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev_id) = prev {
            width += scaled.kern(prev_id, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev = Some(glyph_id);
    }
    width
}

/// Accumulates glyph coverage into `buffer`, horizontally and vertically
/// centered on the canvas.
fn rasterize_centered(
    font: &FontArc,
    text: &str,
    size: f32,
    px_w: usize,
    px_h: usize,
    buffer: &mut [f32],
) {
    let scaled = font.as_scaled(size);
    let text_width = measure_width(font, text, size);

    let mut cursor_x = (px_w as f32 - text_width) * 0.5;
    // Center the ascent..descent band vertically.
    let baseline_y = (px_h as f32 + scaled.ascent() + scaled.descent()) * 0.5;

    let mut prev = None;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev_id) = prev {
            cursor_x += scaled.kern(prev_id, glyph_id);
        }
        let glyph = glyph_id.with_scale_and_position(size, ab_glyph::point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, cov| {
                let x = bounds.min.x as i32 + px as i32;
                let y = bounds.min.y as i32 + py as i32;
                if x >= 0 && y >= 0 && (x as usize) < px_w && (y as usize) < px_h {
                    let idx = y as usize * px_w + x as usize;
                    buffer[idx] = buffer[idx].max(cov);
                }
            });
        }
        cursor_x += scaled.h_advance(glyph_id);
        prev = Some(glyph_id);
    }
}

/// Max-filter dilation of the coverage mask; the ring beyond the glyph body
/// becomes the outline stroke.
fn dilate(coverage: &[f32], px_w: usize, px_h: usize, radius: i32) -> Vec<f32> {
    let mut out = vec![0.0f32; coverage.len()];
    for y in 0..px_h as i32 {
        for x in 0..px_w as i32 {
            let mut best = 0.0f32;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx >= 0 && ny >= 0 && (nx as usize) < px_w && (ny as usize) < px_h {
                        best = best.max(coverage[ny as usize * px_w + nx as usize]);
                    }
                }
            }
            out[y as usize * px_w + x as usize] = best;
        }
    }
    out
}

/// Composites the text coverage over the halo ring onto a transparent canvas.
fn compose(coverage: &[f32], halo: &[f32], px_w: usize, px_h: usize, text_color: Color32) -> ColorImage {
    let mut image = ColorImage::new([px_w, px_h], Color32::TRANSPARENT);
    for (idx, pixel) in image.pixels.iter_mut().enumerate() {
        let text_a = coverage[idx].clamp(0.0, 1.0);
        // Only the part of the dilated mask outside the glyph body shows.
        let halo_a = (halo[idx].clamp(0.0, 1.0) - text_a).max(0.0);
        let out_a = text_a + halo_a * (1.0 - text_a);
        if out_a <= 0.0 {
            continue;
        }

        let channel = |text_c: u8, halo_c: u8| -> u8 {
            let c = (f32::from(text_c) * text_a
                + f32::from(halo_c) * halo_a * (1.0 - text_a))
                / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        *pixel = Color32::from_rgba_unmultiplied(
            channel(text_color.r(), HALO_COLOR.r()),
            channel(text_color.g(), HALO_COLOR.g()),
            channel(text_color.b(), HALO_COLOR.b()),
            (out_a * 255.0).round() as u8,
        );
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::EmbroideryFont;

    fn spec(text: &str, size: f32) -> EmbroiderySpec {
        EmbroiderySpec {
            text: text.to_owned(),
            font: EmbroideryFont::Arial,
            size,
            color: "#ffffff".to_owned(),
        }
    }

    #[test]
    fn test_identical_specs_give_identical_dimensions() {
        let synth = TextSynthesizer::new().unwrap();
        let first = synth.synthesize(&spec("A", 48.0)).unwrap();
        let second = synth.synthesize(&spec("A", 48.0)).unwrap();
        assert_eq!(first.size, second.size);
    }

    #[test]
    fn test_empty_text_yields_minimum_blank_canvas() {
        let synth = TextSynthesizer::new().unwrap();
        let image = synth.synthesize(&spec("", 48.0)).unwrap();
        assert_eq!(image.size[0], (MIN_WIDTH * SUPERSAMPLE).ceil() as usize);
        assert_eq!(image.size[1], ((48.0 + 2.0 * PADDING) * SUPERSAMPLE).ceil() as usize);
        assert!(image.pixels.iter().all(|p| p.a() == 0));
    }

    #[test]
    fn test_longer_text_widens_canvas() {
        let synth = TextSynthesizer::new().unwrap();
        let short = synth.synthesize(&spec("HI", 40.0)).unwrap();
        let long = synth.synthesize(&spec("HELLO WORLD", 40.0)).unwrap();
        assert!(long.size[0] > short.size[0]);
        assert_eq!(long.size[1], short.size[1]);
    }

    #[test]
    fn test_text_produces_visible_pixels() {
        let synth = TextSynthesizer::new().unwrap();
        let image = synth.synthesize(&spec("LUX", 48.0)).unwrap();
        assert!(image.pixels.iter().any(|p| p.a() > 0));
    }

    #[test]
    fn test_non_positive_size_is_rejected() {
        let synth = TextSynthesizer::new().unwrap();
        let result = synth.synthesize(&spec("A", 0.0));
        assert!(matches!(result, Err(DesignError::SynthesisUnavailable(_))));
    }
}
