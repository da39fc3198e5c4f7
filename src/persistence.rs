//! Design persistence: the single save slot, timestamped file export, and
//! thumbnail capture.
//!
//! Every operation here is I/O-adjacent and therefore non-fatal by contract:
//! failures are reported to the user through the app's status line and never
//! leave the live design model inconsistent.

use std::fs;
use std::path::{Path, PathBuf};

use egui::ColorImage;
use image::RgbaImage;
use thiserror::Error;

use crate::design::DesignTransport;
use crate::util::time;

/// Errors that can occur during design persistence operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize design: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write design: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to read design slot: {0}")]
    Read(String),

    #[error("Failed to capture thumbnail: {0}")]
    Thumbnail(String),
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Name of the single save slot. Overwritten on each save, read back
/// verbatim on load.
pub const SLOT_FILE: &str = "design.json";

/// File-backed persistence rooted at one directory.
#[derive(Debug, Clone)]
pub struct DesignPersistence {
    dir: PathBuf,
}

impl DesignPersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self) -> PathBuf {
        self.dir.join(SLOT_FILE)
    }

    /// Writes the snapshot to the save slot, replacing any previous save.
    pub fn save_slot(&self, snapshot: &DesignTransport) -> PersistenceResult<PathBuf> {
        let path = self.slot_path();
        self.write_json(&path, snapshot)?;
        Ok(path)
    }

    /// Reads the save slot back. A missing or unparseable slot is a `Read`
    /// error; validation against the static key sets happens at import.
    pub fn load_slot(&self) -> PersistenceResult<DesignTransport> {
        let path = self.slot_path();
        let json = fs::read_to_string(&path)
            .map_err(|err| PersistenceError::Read(format!("{}: {err}", path.display())))?;
        DesignTransport::from_json(&json)
            .map_err(|err| PersistenceError::Read(format!("{}: {err}", path.display())))
    }

    /// Writes the snapshot as an indented-JSON download artifact named with
    /// the current timestamp. Returns the path written.
    pub fn export_file(&self, snapshot: &DesignTransport) -> PersistenceResult<PathBuf> {
        let path = self.dir.join(format!("design-{}.json", time::file_timestamp()));
        self.write_json(&path, snapshot)?;
        Ok(path)
    }

    /// Encodes a captured frame as a timestamped PNG artifact.
    pub fn save_thumbnail(&self, frame: &ColorImage) -> PersistenceResult<PathBuf> {
        let [width, height] = frame.size;
        if width == 0 || height == 0 {
            return Err(PersistenceError::Thumbnail("empty frame".to_owned()));
        }

        let mut rgba = Vec::with_capacity(width * height * 4);
        for pixel in &frame.pixels {
            rgba.extend_from_slice(&pixel.to_srgba_unmultiplied());
        }
        let buffer = RgbaImage::from_raw(width as u32, height as u32, rgba)
            .ok_or_else(|| PersistenceError::Thumbnail("frame size mismatch".to_owned()))?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("thumbnail-{}.png", time::file_timestamp()));
        buffer
            .save(&path)
            .map_err(|err| PersistenceError::Thumbnail(err.to_string()))?;
        Ok(path)
    }

    fn write_json(&self, path: &Path, snapshot: &DesignTransport) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = snapshot.to_json_pretty()?;
        fs::write(path, json)?;
        Ok(())
    }
}
