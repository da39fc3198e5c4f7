use crate::design::{DesignModel, Region};
use crate::scene::{parse_color, SceneSurfaces};

/// Applies each region's appearance (base color plus material-derived
/// shading) onto its renderable surface.
#[derive(Debug, Default)]
pub struct RegionBinder;

impl RegionBinder {
    pub fn new() -> Self {
        Self
    }

    /// One synchronization pass. Regions whose surface is not installed yet
    /// are skipped without error and reconciled on a later pass; this is a
    /// best-effort eventual-consistency contract while the model loads.
    pub fn sync(&self, model: &DesignModel, scene: &mut SceneSurfaces) {
        let mut skipped = 0usize;
        for region in Region::ALL {
            let Some(current) = scene.material(region) else {
                skipped += 1;
                continue;
            };

            let appearance = model.appearance(region);
            let shading = appearance.material.shading();

            // Clone-and-extend: the embroidery texture and alpha settings on
            // this surface belong to the embroidery binder and are preserved.
            let mut next = current.clone();
            next.base_color = parse_color(&appearance.color);
            next.roughness = shading.roughness;
            next.metalness = shading.metalness;
            scene.replace_material(region, next);
        }
        if skipped > 0 {
            log::trace!("region binder: {skipped} surface(s) not yet available, will retry");
        }
    }
}
