use std::collections::BTreeMap;

use egui::{Context, TextureFilter, TextureOptions};

use crate::design::{DesignModel, EmbroiderySpec, EmbroideryTarget};
use crate::error::DesignError;
use crate::scene::{SceneSurfaces, EMBROIDERY_ALPHA_CUTOFF};
use crate::synthesizer::TextSynthesizer;

/// Synchronizes embroidery targets with their regions' texture resources.
///
/// Each region exclusively owns at most one bound texture handle; replacing
/// or clearing it drops the prior handle in the same pass, which releases
/// the GPU-side bitmap.
pub struct EmbroideryBinder {
    synthesizer: TextSynthesizer,
    /// Last spec applied per target, to skip redundant re-synthesis when an
    /// unrelated part of the model changed.
    applied: BTreeMap<EmbroideryTarget, Option<EmbroiderySpec>>,
}

impl EmbroideryBinder {
    pub fn new() -> Result<Self, DesignError> {
        Ok(Self {
            synthesizer: TextSynthesizer::new()?,
            applied: BTreeMap::new(),
        })
    }

    /// One synchronization pass over every target. Targets whose region
    /// surface is not installed yet are skipped and retried on a later pass.
    /// Synthesis failures are returned for user-facing reporting and do not
    /// abort the remaining targets.
    pub fn sync(
        &mut self,
        model: &DesignModel,
        scene: &mut SceneSurfaces,
        ctx: &Context,
    ) -> Vec<DesignError> {
        let mut failures = Vec::new();

        for target in EmbroideryTarget::ALL {
            let region = target.region();
            if !scene.is_installed(region) {
                log::trace!("embroidery binder: surface for {} not yet available", region.key());
                continue;
            }

            let desired = model.embroidery_spec(target).cloned();
            if self.applied.get(&target) == Some(&desired) {
                continue;
            }

            match &desired {
                None => {
                    // Clearing is idempotent: an already-clear surface stays
                    // clear; otherwise the replaced material drops the handle.
                    if let Some(current) = scene.material(region) {
                        let mut next = current.clone();
                        next.embroidery = None;
                        next.alpha_blend = false;
                        next.alpha_cutoff = 0.0;
                        scene.replace_material(region, next);
                    }
                }
                Some(spec) => {
                    let image = match self.synthesizer.synthesize(spec) {
                        Ok(image) => image,
                        Err(err) => {
                            log::warn!("embroidery synthesis failed for {}: {err}", target.key());
                            failures.push(err);
                            continue;
                        }
                    };
                    let handle = ctx.load_texture(
                        format!("embroidery_{}", target.key()),
                        image,
                        TextureOptions {
                            mipmap_mode: Some(TextureFilter::Linear),
                            ..TextureOptions::LINEAR
                        },
                    );
                    if let Some(current) = scene.material(region) {
                        // Replace, never mutate in place: the clone carries
                        // the shading the region binder applied, extended
                        // with the fresh texture. Assigning it back drops the
                        // previously bound handle.
                        let mut next = current.clone();
                        next.embroidery = Some(handle);
                        next.alpha_blend = true;
                        next.alpha_cutoff = EMBROIDERY_ALPHA_CUTOFF;
                        scene.replace_material(region, next);
                    }
                }
            }

            self.applied.insert(target, desired);
        }

        failures
    }
}
