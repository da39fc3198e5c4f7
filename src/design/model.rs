use std::collections::BTreeMap;

use crate::error::DesignError;

/// A customizable surface of the glove model.
///
/// The set of regions is static per product definition: regions are never
/// created or destroyed at runtime, and every region always carries exactly
/// one [`RegionAppearance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Palm,
    Backhand,
    Thumb,
    WristStrap,
    Webbing,
    Patch,
}

impl Region {
    /// Every region, in display order. The first entry is the default
    /// selection.
    pub const ALL: [Region; 6] = [
        Region::Palm,
        Region::Backhand,
        Region::Thumb,
        Region::WristStrap,
        Region::Webbing,
        Region::Patch,
    ];

    /// Stable string key used in the transport format.
    pub fn key(self) -> &'static str {
        match self {
            Region::Palm => "glove_palm",
            Region::Backhand => "glove_backhand",
            Region::Thumb => "glove_thumb",
            Region::WristStrap => "wrist_strap",
            Region::Webbing => "webbing",
            Region::Patch => "patch",
        }
    }

    pub fn from_key(key: &str) -> Result<Region, DesignError> {
        Region::ALL
            .into_iter()
            .find(|r| r.key() == key)
            .ok_or_else(|| DesignError::InvalidRegionKind(key.to_owned()))
    }

    /// Human-readable name for UI labels.
    pub fn label(self) -> &'static str {
        match self {
            Region::Palm => "Palm",
            Region::Backhand => "Backhand",
            Region::Thumb => "Thumb",
            Region::WristStrap => "Wrist strap",
            Region::Webbing => "Webbing",
            Region::Patch => "Patch",
        }
    }
}

/// Leather/fabric kind for a region. Drives the shading lookup in
/// [`crate::scene`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Material {
    #[default]
    FullGrain,
    Suede,
    Synthetic,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::FullGrain, Material::Suede, Material::Synthetic];

    pub fn key(self) -> &'static str {
        match self {
            Material::FullGrain => "full_grain",
            Material::Suede => "suede",
            Material::Synthetic => "synthetic",
        }
    }

    pub fn from_key(key: &str) -> Result<Material, DesignError> {
        Material::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| DesignError::InvalidMaterialKind(key.to_owned()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Material::FullGrain => "Full-grain",
            Material::Suede => "Suede",
            Material::Synthetic => "Synthetic",
        }
    }
}

/// Default base color for every region: a mid leather brown.
pub const DEFAULT_COLOR: &str = "#8b5a2b";

/// Appearance attributes attached to one region. Color and pattern are
/// opaque strings, passed through to the transport format untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAppearance {
    pub material: Material,
    pub color: String,
    pub pattern: String,
}

impl Default for RegionAppearance {
    fn default() -> Self {
        Self {
            material: Material::FullGrain,
            color: DEFAULT_COLOR.to_owned(),
            pattern: "none".to_owned(),
        }
    }
}

/// A personalization slot. Each target maps to exactly one region whose
/// surface receives the rendered text texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmbroideryTarget {
    WristName,
    ThumbName,
    PatchLogo,
}

impl EmbroideryTarget {
    pub const ALL: [EmbroideryTarget; 3] = [
        EmbroideryTarget::WristName,
        EmbroideryTarget::ThumbName,
        EmbroideryTarget::PatchLogo,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EmbroideryTarget::WristName => "wrist_name",
            EmbroideryTarget::ThumbName => "thumb_name",
            EmbroideryTarget::PatchLogo => "patch_logo",
        }
    }

    pub fn from_key(key: &str) -> Result<EmbroideryTarget, DesignError> {
        EmbroideryTarget::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| DesignError::MalformedDesign(format!("unknown embroidery target `{key}`")))
    }

    /// The physical region this target's texture is bound to. Static lookup,
    /// fixed at build time.
    pub fn region(self) -> Region {
        match self {
            EmbroideryTarget::WristName => Region::WristStrap,
            EmbroideryTarget::ThumbName => Region::Thumb,
            EmbroideryTarget::PatchLogo => Region::Patch,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmbroideryTarget::WristName => "Wrist name",
            EmbroideryTarget::ThumbName => "Thumb name",
            EmbroideryTarget::PatchLogo => "Patch logo",
        }
    }
}

/// Fonts offered for embroidery text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EmbroideryFont {
    #[default]
    Arial,
    Georgia,
    Courier,
}

impl EmbroideryFont {
    pub const ALL: [EmbroideryFont; 3] = [
        EmbroideryFont::Arial,
        EmbroideryFont::Georgia,
        EmbroideryFont::Courier,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EmbroideryFont::Arial => "Arial",
            EmbroideryFont::Georgia => "Georgia",
            EmbroideryFont::Courier => "Courier",
        }
    }

    pub fn from_key(key: &str) -> Result<EmbroideryFont, DesignError> {
        EmbroideryFont::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| DesignError::InvalidFontKind(key.to_owned()))
    }
}

/// Text specification for a set embroidery target. An empty `text` is valid
/// and distinct from the target being unset.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbroiderySpec {
    pub text: String,
    pub font: EmbroideryFont,
    /// Font size in pixels. Must be finite and positive.
    pub size: f32,
    pub color: String,
}

impl Default for EmbroiderySpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: EmbroideryFont::default(),
            size: 48.0,
            color: "#ffffff".to_owned(),
        }
    }
}

/// The canonical design state: one appearance per region and one optional
/// embroidery spec per target. Both maps are total over the static key sets
/// at all times, which is what makes the model safely serializable and
/// restorable.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignModel {
    pub regions: BTreeMap<Region, RegionAppearance>,
    pub embroidery: BTreeMap<EmbroideryTarget, Option<EmbroiderySpec>>,
}

impl Default for DesignModel {
    fn default() -> Self {
        Self {
            regions: Region::ALL
                .into_iter()
                .map(|r| (r, RegionAppearance::default()))
                .collect(),
            embroidery: EmbroideryTarget::ALL.into_iter().map(|t| (t, None)).collect(),
        }
    }
}

impl DesignModel {
    /// True when both maps cover every static key. `DesignModel` values built
    /// through this crate always are; this backs debug assertions at the
    /// store boundary.
    pub fn is_complete(&self) -> bool {
        Region::ALL.iter().all(|r| self.regions.contains_key(r))
            && EmbroideryTarget::ALL.iter().all(|t| self.embroidery.contains_key(t))
    }

    pub fn appearance(&self, region: Region) -> &RegionAppearance {
        // The map is total over Region::ALL.
        &self.regions[&region]
    }

    pub fn embroidery_spec(&self, target: EmbroideryTarget) -> Option<&EmbroiderySpec> {
        self.embroidery[&target].as_ref()
    }
}
