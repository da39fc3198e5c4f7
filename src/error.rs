use thiserror::Error;

/// Errors surfaced by the design store and serializer.
///
/// Binder-level skip conditions (a region whose renderable surface is not
/// installed yet) are deliberately not errors: the binder reconciles that
/// region on a later pass.
#[derive(Debug, Error)]
pub enum DesignError {
    /// A string referenced a region outside the static set.
    #[error("unknown region kind `{0}`")]
    InvalidRegionKind(String),

    /// A string referenced a material outside the enumerated set.
    #[error("unknown material kind `{0}`")]
    InvalidMaterialKind(String),

    /// A string referenced a font outside the enumerated font list.
    #[error("unknown embroidery font `{0}`")]
    InvalidFontKind(String),

    /// An imported snapshot is missing required keys or carries out-of-domain
    /// values. The live model is never modified by a rejected import.
    #[error("malformed design snapshot: {0}")]
    MalformedDesign(String),

    /// The text rasterizer could not be set up (font face unavailable).
    /// Reported to the user; other bindings proceed.
    #[error("embroidery synthesis unavailable: {0}")]
    SynthesisUnavailable(String),
}
