use std::cell::RefCell;

use crate::design::model::{DesignModel, EmbroiderySpec, EmbroideryTarget, Material, Region};
use crate::design::transport::{self, DesignTransport};
use crate::error::DesignError;

/// Callback invoked with the full current model after every successful
/// mutation.
pub type Subscriber = Box<dyn FnMut(&DesignModel)>;

/// The single source of truth for the design state.
///
/// Owned by the composition root and passed to binders and UI controls; there
/// is no ambient global. Mutations are run-to-completion: the model is
/// replaced as a whole value and subscribers are notified synchronously after
/// the new model is in place, so no partial write is ever observable.
pub struct DesignStore {
    model: DesignModel,
    /// Which region is active in the UI. Transient, never serialized.
    selected: Region,
    /// Bumped on every model mutation. Binders key their per-frame
    /// reconciliation off this.
    revision: u64,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl Default for DesignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DesignStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignStore")
            .field("model", &self.model)
            .field("selected", &self.selected)
            .field("revision", &self.revision)
            .field("subscribers", &format!("<{} subscribers>", self.subscribers.borrow().len()))
            .finish()
    }
}

impl DesignStore {
    pub fn new() -> Self {
        Self {
            model: DesignModel::default(),
            selected: Region::ALL[0],
            revision: 0,
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn model(&self) -> &DesignModel {
        &self.model
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected(&self) -> Region {
        self.selected
    }

    /// Register a callback to receive the full model after every mutation.
    pub fn subscribe(&self, subscriber: Subscriber) {
        self.subscribers.borrow_mut().push(subscriber);
    }

    /// Replaces the model's color for `region`, leaving material and pattern
    /// untouched.
    pub fn set_region_color(&mut self, region: Region, color: impl Into<String>) {
        let color = color.into();
        self.mutate(|model| {
            if let Some(appearance) = model.regions.get_mut(&region) {
                appearance.color = color;
            }
        });
    }

    pub fn set_region_material(&mut self, region: Region, material: Material) {
        self.mutate(|model| {
            if let Some(appearance) = model.regions.get_mut(&region) {
                appearance.material = material;
            }
        });
    }

    pub fn set_region_pattern(&mut self, region: Region, pattern: impl Into<String>) {
        let pattern = pattern.into();
        self.mutate(|model| {
            if let Some(appearance) = model.regions.get_mut(&region) {
                appearance.pattern = pattern;
            }
        });
    }

    /// Updates the transient selection only. Does not touch the model, bump
    /// the revision, or notify subscribers.
    pub fn select_region(&mut self, region: Region) {
        self.selected = region;
    }

    /// Restores every region appearance to the default and unsets every
    /// embroidery target. Idempotent.
    pub fn reset_design(&mut self) {
        self.replace(DesignModel::default());
    }

    /// Sets or clears the spec for `target`. Setting a spec with empty text
    /// is valid and distinct from clearing: an empty spec still synthesizes a
    /// blank minimum-size texture, while `None` tells the embroidery binder
    /// to release the bound texture resource.
    pub fn set_embroidery(&mut self, target: EmbroideryTarget, spec: Option<EmbroiderySpec>) {
        self.mutate(|model| {
            model.embroidery.insert(target, spec);
        });
    }

    /// Immutable snapshot of the current model, stamped with the export time.
    /// Read-only projection: does not mutate or notify.
    pub fn export(&self) -> DesignTransport {
        let mut tree = transport::to_transport(&self.model);
        tree.created_at = Some(crate::util::time::iso_timestamp());
        tree
    }

    /// Validates `snapshot` against the static key sets and, on success,
    /// atomically replaces the live model and notifies subscribers once.
    /// On failure the live model is left untouched.
    pub fn import(&mut self, snapshot: DesignTransport) -> Result<(), DesignError> {
        let model = snapshot.into_model()?;
        self.replace(model);
        Ok(())
    }

    /// Applies `f` to a working copy of the model, then swaps the copy in
    /// whole. Subscribers observe either the old model or the new one, never
    /// an intermediate state.
    fn mutate(&mut self, f: impl FnOnce(&mut DesignModel)) {
        let mut next = self.model.clone();
        f(&mut next);
        self.replace(next);
    }

    fn replace(&mut self, next: DesignModel) {
        debug_assert!(next.is_complete());
        self.model = next;
        self.revision += 1;
        self.notify();
    }

    fn notify(&mut self) {
        for subscriber in &mut *self.subscribers.borrow_mut() {
            subscriber(&self.model);
        }
    }
}
