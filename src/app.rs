use std::collections::BTreeMap;

use crate::binder::{EmbroideryBinder, RegionBinder};
use crate::design::{DesignStore, EmbroiderySpec, EmbroideryTarget};
use crate::persistence::DesignPersistence;
use crate::scene::SceneSurfaces;

/// One-line, user-visible report of the last recoverable failure or action.
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.message = Some(message);
    }

    pub fn report(&mut self, err: impl std::fmt::Display) {
        log::warn!("{err}");
        self.message = Some(err.to_string());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// The composition root: owns the store, the scene boundary, and both
/// binders, and wires UI controls to store mutations.
///
/// Data flow is one-directional: controls mutate the store, the store bumps
/// its revision, and the next frame runs both binder passes before painting.
pub struct ConfiguratorApp {
    pub(crate) store: DesignStore,
    pub(crate) scene: SceneSurfaces,
    region_binder: RegionBinder,
    embroidery_binder: Option<EmbroideryBinder>,
    persistence: DesignPersistence,
    pub(crate) status: StatusLine,
    /// Revision last projected onto the scene.
    synced_revision: Option<u64>,
    /// Per-target edit buffers for the embroidery controls.
    pub(crate) drafts: BTreeMap<EmbroideryTarget, EmbroiderySpec>,
    thumbnail_requested: bool,
}

impl ConfiguratorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut status = StatusLine::default();
        let embroidery_binder = match EmbroideryBinder::new() {
            Ok(binder) => Some(binder),
            Err(err) => {
                // Embroidery is unavailable but every other binding proceeds.
                status.report(&err);
                None
            }
        };

        let mut app = Self {
            store: DesignStore::new(),
            // Standing in for async model load: the surfaces are ready
            // immediately in this build.
            scene: SceneSurfaces::with_all_installed(),
            region_binder: RegionBinder::new(),
            embroidery_binder,
            persistence: DesignPersistence::new("designs"),
            status,
            synced_revision: None,
            drafts: BTreeMap::new(),
            thumbnail_requested: false,
        };
        app.refresh_drafts();
        app
    }

    /// Re-seeds the embroidery edit buffers from the live model. Called after
    /// any whole-model replacement (reset, import, load).
    pub(crate) fn refresh_drafts(&mut self) {
        self.drafts = EmbroideryTarget::ALL
            .into_iter()
            .map(|target| {
                let draft = self
                    .store
                    .model()
                    .embroidery_spec(target)
                    .cloned()
                    .unwrap_or_default();
                (target, draft)
            })
            .collect();
    }

    /// Runs both binder passes if the model moved since the last projection.
    /// The passes are independent and could run in either order.
    fn sync_scene(&mut self, ctx: &egui::Context) {
        let revision = self.store.revision();
        if self.synced_revision == Some(revision) {
            return;
        }

        self.region_binder.sync(self.store.model(), &mut self.scene);
        if let Some(binder) = &mut self.embroidery_binder {
            for failure in binder.sync(self.store.model(), &mut self.scene, ctx) {
                self.status.report(&failure);
            }
        }
        self.synced_revision = Some(revision);
    }

    pub(crate) fn save_design(&mut self) {
        match self.persistence.save_slot(&self.store.export()) {
            Ok(path) => self.status.info(format!("Saved design to {}", path.display())),
            Err(err) => self.status.report(&err),
        }
    }

    pub(crate) fn load_design(&mut self) {
        let snapshot = match self.persistence.load_slot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.status.report(&err);
                return;
            }
        };
        match self.store.import(snapshot) {
            Ok(()) => {
                self.refresh_drafts();
                self.status.info("Design loaded");
            }
            // A rejected import leaves the live model untouched.
            Err(err) => self.status.report(&err),
        }
    }

    pub(crate) fn export_design(&mut self) {
        match self.persistence.export_file(&self.store.export()) {
            Ok(path) => self.status.info(format!("Exported {}", path.display())),
            Err(err) => self.status.report(&err),
        }
    }

    pub(crate) fn request_thumbnail(&mut self, ctx: &egui::Context) {
        self.thumbnail_requested = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
    }

    fn handle_screenshots(&mut self, ctx: &egui::Context) {
        if !self.thumbnail_requested {
            return;
        }
        let frame = ctx.input(|input| {
            input.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        if let Some(frame) = frame {
            self.thumbnail_requested = false;
            match self.persistence.save_thumbnail(&frame) {
                Ok(path) => self.status.info(format!("Thumbnail saved to {}", path.display())),
                Err(err) => self.status.report(&err),
            }
        }
    }
}

impl eframe::App for ConfiguratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_scene(ctx);
        self.handle_screenshots(ctx);

        crate::panels::controls_panel(self, ctx);
        crate::panels::preview_panel(self, ctx);

        // Mutations made by the panels this frame are projected on the next
        // pass; make sure that pass happens promptly.
        if self.synced_revision != Some(self.store.revision()) {
            ctx.request_repaint();
        }
    }
}
