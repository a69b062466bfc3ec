//! Immutable scene descriptions for the external renderer's builder API.
//!
//! [`SceneDescription::build`] is a pure function from a [`ViewConfig`] to
//! the renderer-agnostic description of everything the 3D view should
//! show. Structural equality between descriptions drives the
//! no-rebuild fast path in [`crate::rebuild`]; a cheap 64-bit fingerprint
//! supports change logging.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::color::Color;
use crate::config::{Representation, StructureFormat, ViewConfig};
use crate::error::ConfigError;
use crate::style::{OverrideWarning, StyleTable};

/// Which structural component a scene layer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerTarget {
    /// Protein/nucleic polymer chains.
    Polymer,
    /// Non-polymer ligands and cofactors.
    Ligand,
    /// Branched (glycan) entities.
    Branched,
}

/// One additive sub-layer of the scene.
///
/// The user-selected representation kind governs the polymer layer only;
/// secondary components follow a fixed policy (ligands ball-and-stick,
/// branched entities carbohydrate symbols, water not rendered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneLayer {
    /// Structural component this layer covers.
    pub target: LayerTarget,
    /// Geometric representation for the component.
    pub representation: Representation,
}

/// Derived, immutable description of one rendered scene.
///
/// Owned exclusively by the [`crate::rebuild::RebuildController`] for the
/// duration of one mounted view instance; replaced, never mutated, on
/// each configuration change.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    /// Fully resolved structure data URL.
    pub source_url: String,
    /// Parsing format for the structure data.
    pub format: StructureFormat,
    /// Additive scene layers, polymer first.
    pub layers: Vec<SceneLayer>,
    /// Resolved per-residue style table for the polymer layer.
    pub style: StyleTable,
    /// Opaque renderer pass-through options.
    pub renderer_options: serde_json::Value,
}

impl SceneDescription {
    /// Build a description from a configuration.
    ///
    /// Pure: identical configs (by structural equality) yield structurally
    /// equal descriptions, and no I/O or mutation happens here. Malformed
    /// override entries are dropped and returned as warnings.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if a configuration field is rejected; nothing is
    /// silently defaulted.
    pub fn build(
        config: &ViewConfig,
    ) -> Result<(Self, Vec<OverrideWarning>), ConfigError> {
        config.source.validate()?;
        let base = Color::parse(&config.default_color)
            .map_err(|e| ConfigError::InvalidColor(e.value))?;
        let (style, warnings) = StyleTable::resolve(base, &config.overrides);

        let layers = vec![
            SceneLayer {
                target: LayerTarget::Polymer,
                representation: config.representation,
            },
            SceneLayer {
                target: LayerTarget::Ligand,
                representation: Representation::BallAndStick,
            },
            SceneLayer {
                target: LayerTarget::Branched,
                representation: Representation::Carbohydrate,
            },
        ];

        Ok((
            Self {
                source_url: config.source.resolve_url(config.format),
                format: config.format,
                layers,
                style,
                renderer_options: config.renderer_options.clone(),
            },
            warnings,
        ))
    }

    /// 64-bit structural fingerprint (FxHasher). Equal descriptions hash
    /// equally; used for cheap change detection and logging, with
    /// [`PartialEq`] as the authoritative comparison.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// The polymer layer's representation kind.
    #[must_use]
    pub fn polymer_representation(&self) -> Representation {
        self.layers
            .iter()
            .find(|l| l.target == LayerTarget::Polymer)
            .map_or(Representation::Cartoon, |l| l.representation)
    }
}

impl Hash for SceneDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source_url.hash(state);
        self.format.hash(state);
        self.layers.hash(state);
        self.style.hash(state);
        hash_json(&self.renderer_options, state);
    }
}

/// Recursive structural hash over a JSON value. Object keys iterate in
/// sorted order (serde_json's default map), so the hash is deterministic.
fn hash_json<H: Hasher>(value: &serde_json::Value, state: &mut H) {
    use serde_json::Value;
    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Number(n) => {
            state.write_u8(2);
            if let Some(i) = n.as_i64() {
                i.hash(state);
            } else if let Some(u) = n.as_u64() {
                u.hash(state);
            } else if let Some(f) = n.as_f64() {
                f.to_bits().hash(state);
            }
        }
        Value::String(s) => {
            state.write_u8(3);
            s.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            state.write_usize(items.len());
            for item in items {
                hash_json(item, state);
            }
        }
        Value::Object(map) => {
            state.write_u8(5);
            state.write_usize(map.len());
            for (key, item) in map {
                key.hash(state);
                hash_json(item, state);
            }
        }
    }
}
