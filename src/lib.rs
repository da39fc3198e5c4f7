#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod binder;
pub mod design;
pub mod error;
pub mod panels;
pub mod persistence;
pub mod scene;
pub mod synthesizer;
pub mod util;

pub use app::ConfiguratorApp;
pub use binder::{EmbroideryBinder, RegionBinder};
pub use design::{DesignModel, DesignStore, DesignTransport};
pub use error::DesignError;
pub use scene::SceneSurfaces;
pub use synthesizer::TextSynthesizer;
