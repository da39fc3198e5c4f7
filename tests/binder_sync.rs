//! End-to-end synchronization: store mutations projected onto scene surfaces
//! through both binders, using a headless egui context for texture uploads.

use egui::{Color32, Context};
use glovesmith::binder::{EmbroideryBinder, RegionBinder};
use glovesmith::design::{
    DesignStore, EmbroideryFont, EmbroiderySpec, EmbroideryTarget, Material, Region,
};
use glovesmith::scene::SceneSurfaces;

fn sync_all(
    store: &DesignStore,
    scene: &mut SceneSurfaces,
    region: &RegionBinder,
    embroidery: &mut EmbroideryBinder,
    ctx: &Context,
) {
    region.sync(store.model(), scene);
    let failures = embroidery.sync(store.model(), scene, ctx);
    assert!(failures.is_empty(), "unexpected binder failures: {failures:?}");
}

#[test]
fn color_and_material_changes_reach_the_surface() {
    let ctx = Context::default();
    let mut store = DesignStore::new();
    let mut scene = SceneSurfaces::with_all_installed();
    let region_binder = RegionBinder::new();
    let mut embroidery_binder = EmbroideryBinder::new().unwrap();

    store.set_region_color(Region::Palm, "#112233");
    store.set_region_material(Region::Palm, Material::Synthetic);
    sync_all(&store, &mut scene, &region_binder, &mut embroidery_binder, &ctx);

    let palm = scene.material(Region::Palm).unwrap();
    assert_eq!(palm.base_color, Color32::from_rgb(0x11, 0x22, 0x33));
    assert_eq!(palm.roughness, 0.6);
    assert_eq!(palm.metalness, 0.05);
}

#[test]
fn set_then_clear_patch_releases_the_texture_resource() {
    let ctx = Context::default();
    let mut store = DesignStore::new();
    let mut scene = SceneSurfaces::with_all_installed();
    let region_binder = RegionBinder::new();
    let mut embroidery_binder = EmbroideryBinder::new().unwrap();

    store.set_embroidery(
        EmbroideryTarget::PatchLogo,
        Some(EmbroiderySpec {
            text: "LUX".to_owned(),
            font: EmbroideryFont::Arial,
            size: 40.0,
            color: "#fff".to_owned(),
        }),
    );
    sync_all(&store, &mut scene, &region_binder, &mut embroidery_binder, &ctx);
    assert!(scene.material(Region::Patch).unwrap().embroidery.is_some());

    store.set_embroidery(EmbroideryTarget::PatchLogo, None);
    sync_all(&store, &mut scene, &region_binder, &mut embroidery_binder, &ctx);

    // The final model shows the target unset and the region no longer holds
    // a texture handle; dropping the last handle released the bitmap.
    assert!(store.model().embroidery_spec(EmbroideryTarget::PatchLogo).is_none());
    let patch = scene.material(Region::Patch).unwrap();
    assert!(patch.embroidery.is_none());
    assert!(!patch.alpha_blend);
}

#[test]
fn binder_order_does_not_matter_for_shared_regions() {
    let ctx = Context::default();
    let mut store = DesignStore::new();
    let region_binder = RegionBinder::new();

    store.set_region_color(Region::WristStrap, "#995511");
    store.set_region_material(Region::WristStrap, Material::Suede);
    store.set_embroidery(
        EmbroideryTarget::WristName,
        Some(EmbroiderySpec {
            text: "AVA".to_owned(),
            font: EmbroideryFont::Georgia,
            size: 36.0,
            color: "#ffffff".to_owned(),
        }),
    );

    // Region pass first.
    let mut scene_a = SceneSurfaces::with_all_installed();
    let mut binder_a = EmbroideryBinder::new().unwrap();
    region_binder.sync(store.model(), &mut scene_a);
    binder_a.sync(store.model(), &mut scene_a, &ctx);

    // Embroidery pass first.
    let mut scene_b = SceneSurfaces::with_all_installed();
    let mut binder_b = EmbroideryBinder::new().unwrap();
    binder_b.sync(store.model(), &mut scene_b, &ctx);
    region_binder.sync(store.model(), &mut scene_b);

    for scene in [&scene_a, &scene_b] {
        let wrist = scene.material(Region::WristStrap).unwrap();
        assert_eq!(wrist.base_color, Color32::from_rgb(0x99, 0x55, 0x11));
        assert_eq!(wrist.roughness, 0.9);
        assert!(wrist.embroidery.is_some());
        assert!(wrist.alpha_blend);
    }
}

#[test]
fn late_surface_install_is_reconciled_on_the_next_pass() {
    let ctx = Context::default();
    let mut store = DesignStore::new();
    let mut scene = SceneSurfaces::new();
    let region_binder = RegionBinder::new();
    let mut embroidery_binder = EmbroideryBinder::new().unwrap();

    store.set_region_color(Region::Backhand, "#0a0b0c");
    store.set_embroidery(
        EmbroideryTarget::ThumbName,
        Some(EmbroiderySpec {
            text: "SAM".to_owned(),
            font: EmbroideryFont::Courier,
            size: 28.0,
            color: "#fff".to_owned(),
        }),
    );

    // Model still loading: nothing installed, passes are silent no-ops.
    sync_all(&store, &mut scene, &region_binder, &mut embroidery_binder, &ctx);
    assert!(scene.material(Region::Backhand).is_none());

    scene.install_all();
    sync_all(&store, &mut scene, &region_binder, &mut embroidery_binder, &ctx);
    assert_eq!(
        scene.material(Region::Backhand).unwrap().base_color,
        Color32::from_rgb(0x0a, 0x0b, 0x0c)
    );
    assert!(scene.material(Region::Thumb).unwrap().embroidery.is_some());
}

#[test]
fn identical_specs_synthesize_identical_texture_dimensions() {
    let ctx = Context::default();
    let region_binder = RegionBinder::new();
    let spec = EmbroiderySpec {
        text: "A".to_owned(),
        font: EmbroideryFont::Arial,
        size: 48.0,
        color: "#fff".to_owned(),
    };

    let mut sizes = Vec::new();
    for _ in 0..2 {
        let mut store = DesignStore::new();
        let mut scene = SceneSurfaces::with_all_installed();
        let mut embroidery_binder = EmbroideryBinder::new().unwrap();
        store.set_embroidery(EmbroideryTarget::PatchLogo, Some(spec.clone()));
        sync_all(&store, &mut scene, &region_binder, &mut embroidery_binder, &ctx);
        let handle = scene.material(Region::Patch).unwrap().embroidery.clone().unwrap();
        sizes.push(handle.size());
    }
    assert_eq!(sizes[0], sizes[1]);
}
