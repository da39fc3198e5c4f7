//! The renderable-surface boundary.
//!
//! The real 3D scene (scene graph, camera, model loading) lives outside this
//! crate; binders talk to it through [`SceneSurfaces`]. A region whose
//! surface has not been installed yet is simply skipped by binder passes and
//! reconciled once it appears.

use std::collections::BTreeMap;

use egui::{Color32, TextureHandle};

use crate::design::{Material, Region, DEFAULT_COLOR};

/// Physically-based shading parameters derived from a material kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    /// Pure lookup from material kind to shading parameters.
    pub fn shading(self) -> Shading {
        match self {
            Material::Suede => Shading { roughness: 0.9, metalness: 0.0 },
            Material::FullGrain => Shading { roughness: 0.5, metalness: 0.0 },
            Material::Synthetic => Shading { roughness: 0.6, metalness: 0.05 },
        }
    }
}

/// Alpha cutoff applied to embroidery textures so the halo fades cleanly
/// against any base color.
pub const EMBROIDERY_ALPHA_CUTOFF: f32 = 0.05;

/// The appearance descriptor bound to one region's surface.
///
/// This is a value type: each installed region exclusively owns one. Binders
/// that need to extend it clone it, mutate the clone, and assign it back,
/// which keeps regions from aliasing a shared default. The `embroidery`
/// handle is the region's exclusively-owned texture resource; overwriting or
/// clearing it drops the handle, which releases the GPU-side bitmap.
#[derive(Clone)]
pub struct SurfaceMaterial {
    pub base_color: Color32,
    pub roughness: f32,
    pub metalness: f32,
    pub embroidery: Option<TextureHandle>,
    pub alpha_blend: bool,
    pub alpha_cutoff: f32,
}

impl std::fmt::Debug for SurfaceMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceMaterial")
            .field("base_color", &self.base_color)
            .field("roughness", &self.roughness)
            .field("metalness", &self.metalness)
            .field("embroidery", &self.embroidery.as_ref().map(|t| t.id()))
            .field("alpha_blend", &self.alpha_blend)
            .field("alpha_cutoff", &self.alpha_cutoff)
            .finish()
    }
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        let shading = Material::default().shading();
        Self {
            base_color: parse_color(DEFAULT_COLOR),
            roughness: shading.roughness,
            metalness: shading.metalness,
            embroidery: None,
            alpha_blend: false,
            alpha_cutoff: 0.0,
        }
    }
}

/// Per-region surface registry standing in for the 3D model's meshes.
///
/// Surfaces start uninstalled (model still loading) and are installed as the
/// scene reports them ready.
#[derive(Debug, Default)]
pub struct SceneSurfaces {
    surfaces: BTreeMap<Region, SurfaceMaterial>,
}

impl SceneSurfaces {
    /// A scene with no surfaces installed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene with every static region ready, as after model load.
    pub fn with_all_installed() -> Self {
        let mut scene = Self::new();
        scene.install_all();
        scene
    }

    /// Marks `region`'s surface as ready, with the default material.
    /// Installing an already-installed region keeps its current material.
    pub fn install(&mut self, region: Region) {
        self.surfaces.entry(region).or_default();
    }

    pub fn install_all(&mut self) {
        for region in Region::ALL {
            self.install(region);
        }
    }

    pub fn is_installed(&self, region: Region) -> bool {
        self.surfaces.contains_key(&region)
    }

    pub fn material(&self, region: Region) -> Option<&SurfaceMaterial> {
        self.surfaces.get(&region)
    }

    pub fn material_mut(&mut self, region: Region) -> Option<&mut SurfaceMaterial> {
        self.surfaces.get_mut(&region)
    }

    /// Replaces the whole material value for an installed region. The prior
    /// value (and any texture handle it owned) is dropped here. Returns false
    /// when the surface is not installed yet.
    pub fn replace_material(&mut self, region: Region, material: SurfaceMaterial) -> bool {
        match self.surfaces.get_mut(&region) {
            Some(slot) => {
                *slot = material;
                true
            }
            None => false,
        }
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` into a [`Color32`]. Color strings
/// in the model are opaque and never validated, so anything unparseable
/// falls back to opaque mid-gray rather than failing the binder pass.
pub fn parse_color(color: &str) -> Color32 {
    const FALLBACK: Color32 = Color32::from_rgb(0x80, 0x80, 0x80);

    let hex = match color.strip_prefix('#') {
        Some(hex) => hex,
        None => return FALLBACK,
    };
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);
    let digits: Option<Vec<u8>> = hex.chars().map(nibble).collect();
    let digits = match digits {
        Some(d) => d,
        None => return FALLBACK,
    };

    match digits.as_slice() {
        [r, g, b] => Color32::from_rgb(r * 17, g * 17, b * 17),
        [r1, r0, g1, g0, b1, b0] => Color32::from_rgb(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0),
        [r1, r0, g1, g0, b1, b0, a1, a0] => Color32::from_rgba_unmultiplied(
            r1 * 16 + r0,
            g1 * 16 + g0,
            b1 * 16 + b0,
            a1 * 16 + a0,
        ),
        _ => FALLBACK,
    }
}
