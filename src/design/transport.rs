//! The transport format: a JSON-compatible tree mirroring the design model
//! with string keys, used for the persistence slot and file export.
//!
//! Import validation is reject-whole: a snapshot either converts into a fully
//! valid [`DesignModel`] or fails without side effects. Unknown extra keys in
//! a snapshot are ignored rather than rejected, so snapshots written by newer
//! versions with additional regions or targets still load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::design::model::{
    DesignModel, EmbroideryFont, EmbroiderySpec, EmbroideryTarget, Material, Region,
    RegionAppearance,
};
use crate::error::DesignError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportAppearance {
    pub material: String,
    pub color: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSpec {
    pub text: String,
    pub font: String,
    pub size: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportEmbroidery {
    pub targets: BTreeMap<String, Option<TransportSpec>>,
}

/// Serializable snapshot of a design. `created_at` is stamped at export time
/// only; the live model never carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTransport {
    pub regions: BTreeMap<String, TransportAppearance>,
    pub embroidery: TransportEmbroidery,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Direct structural copy of the model. Transient selection state is not
/// part of the model and therefore not part of the tree.
pub fn to_transport(model: &DesignModel) -> DesignTransport {
    DesignTransport {
        regions: model
            .regions
            .iter()
            .map(|(region, appearance)| {
                (
                    region.key().to_owned(),
                    TransportAppearance {
                        material: appearance.material.key().to_owned(),
                        color: appearance.color.clone(),
                        pattern: appearance.pattern.clone(),
                    },
                )
            })
            .collect(),
        embroidery: TransportEmbroidery {
            targets: model
                .embroidery
                .iter()
                .map(|(target, spec)| {
                    (
                        target.key().to_owned(),
                        spec.as_ref().map(|s| TransportSpec {
                            text: s.text.clone(),
                            font: s.font.key().to_owned(),
                            size: s.size,
                            color: s.color.clone(),
                        }),
                    )
                })
                .collect(),
        },
        created_at: None,
    }
}

impl DesignTransport {
    /// Validates the tree against the static key sets and converts it into a
    /// complete model. Missing required keys fail with
    /// [`DesignError::MalformedDesign`]; out-of-domain enumerated values fail
    /// with their kind-specific error. Extra keys are skipped.
    pub fn into_model(self) -> Result<DesignModel, DesignError> {
        let mut regions = BTreeMap::new();
        for region in Region::ALL {
            let raw = self.regions.get(region.key()).ok_or_else(|| {
                DesignError::MalformedDesign(format!("missing region `{}`", region.key()))
            })?;
            regions.insert(
                region,
                RegionAppearance {
                    material: Material::from_key(&raw.material)?,
                    color: raw.color.clone(),
                    pattern: raw.pattern.clone(),
                },
            );
        }

        let mut embroidery = BTreeMap::new();
        for target in EmbroideryTarget::ALL {
            let raw = self.embroidery.targets.get(target.key()).ok_or_else(|| {
                DesignError::MalformedDesign(format!("missing embroidery target `{}`", target.key()))
            })?;
            let spec = match raw {
                None => None,
                Some(raw) => {
                    if !raw.size.is_finite() || raw.size <= 0.0 {
                        return Err(DesignError::MalformedDesign(format!(
                            "embroidery target `{}` has non-positive size {}",
                            target.key(),
                            raw.size
                        )));
                    }
                    Some(EmbroiderySpec {
                        text: raw.text.clone(),
                        font: EmbroideryFont::from_key(&raw.font)?,
                        size: raw.size,
                        color: raw.color.clone(),
                    })
                }
            };
            embroidery.insert(target, spec);
        }

        Ok(DesignModel { regions, embroidery })
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
