//! Declarative view configuration with TOML preset support.
//!
//! [`ViewConfig`] is the single configuration surface the synchronization
//! engine consumes: structure source, parsing format, polymer
//! representation, default color, per-residue overrides, and opaque
//! renderer options. Configs serialize to/from TOML for view presets and
//! expose a JSON Schema for host UIs.

use std::collections::HashMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ConfigError, SyncError};

/// Structure file format, forwarded to the external renderer's parser.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum StructureFormat {
    /// Binary CIF.
    Bcif,
    /// mmCIF text.
    Mmcif,
    /// Generic CIF text.
    Cif,
    /// Legacy PDB text.
    Pdb,
}

impl StructureFormat {
    /// File extension used when resolving download URLs.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bcif => "bcif",
            Self::Mmcif | Self::Cif => "cif",
            Self::Pdb => "pdb",
        }
    }
}

/// Geometric style for the polymer chains of the 3D view.
///
/// The fixed enumerated set of the builder API; unknown kinds fail
/// deserialization rather than defaulting silently. Only the polymer
/// sub-layer honors this; ligands and other secondary components follow a
/// fixed representation policy (see [`crate::scene`]).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Secondary-structure cartoon.
    Cartoon,
    /// Backbone trace.
    Backbone,
    /// Ball-and-stick atoms and bonds.
    BallAndStick,
    /// Thin bond lines.
    Line,
    /// Van der Waals spheres.
    Spacefill,
    /// Carbohydrate (SNFG) symbols.
    Carbohydrate,
    /// Molecular surface.
    Surface,
}

/// Where the structural data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceRef {
    /// Direct URL to a structure file.
    Url(String),
    /// Bare PDB entry identifier (e.g. `"1CBS"`), resolved to the
    /// canonical PDBe/RCSB download URL for the configured format.
    PdbId(String),
}

impl SourceRef {
    /// Check that the reference is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptySourceUrl`] for an empty URL,
    /// [`ConfigError::InvalidMoleculeId`] for an empty or non-alphanumeric
    /// PDB identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Url(url) => {
                if url.is_empty() {
                    return Err(ConfigError::EmptySourceUrl);
                }
            }
            Self::PdbId(id) => {
                if id.is_empty()
                    || !id.chars().all(|c| c.is_ascii_alphanumeric())
                {
                    return Err(ConfigError::InvalidMoleculeId(id.clone()));
                }
            }
        }
        Ok(())
    }

    /// Resolve to a concrete URL. Binary CIF comes from PDBe, text formats
    /// from RCSB, matching what the hosted viewers serve.
    #[must_use]
    pub fn resolve_url(&self, format: StructureFormat) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::PdbId(id) => match format {
                StructureFormat::Bcif => format!(
                    "https://www.ebi.ac.uk/pdbe/entry-files/{}.bcif",
                    id.to_ascii_lowercase()
                ),
                StructureFormat::Mmcif
                | StructureFormat::Cif
                | StructureFormat::Pdb => format!(
                    "https://files.rcsb.org/download/{}.{}",
                    id.to_ascii_uppercase(),
                    format.extension()
                ),
            },
        }
    }
}

/// Complete declarative description of one synchronized view.
///
/// All fields use `#[serde(default)]` so partial TOML presets (e.g. only
/// overriding the representation) work correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ViewConfig {
    /// Explicit parsing format for the structure data.
    pub format: StructureFormat,
    /// Polymer representation used by the builder.
    pub representation: Representation,
    /// Default polymer color (CSS color string, applied first).
    pub default_color: String,
    /// Structure data source.
    pub source: SourceRef,
    /// Per-residue color overrides keyed by selector string
    /// (`"A:42"`, `"auth:B:100"`). Values are CSS color strings.
    pub overrides: HashMap<String, String>,
    /// Opaque options forwarded to the external renderer, not interpreted
    /// by the engine.
    #[schemars(skip)]
    pub renderer_options: serde_json::Value,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            source: SourceRef::Url(String::new()),
            format: StructureFormat::Bcif,
            representation: Representation::Cartoon,
            default_color: "#888888".to_owned(),
            overrides: HashMap::new(),
            // Empty object, not null: TOML has no null and this field must
            // survive preset round-trips.
            renderer_options: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

impl ViewConfig {
    /// Pre-flight validation of the caller-supplied fields.
    ///
    /// Override-map entries are *not* checked here; malformed overrides
    /// are non-fatal and handled by the resolver (dropped and reported).
    ///
    /// # Errors
    ///
    /// [`ConfigError`] naming the first rejected field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source.validate()?;
        let _ = Color::parse(&self.default_color)
            .map_err(|e| ConfigError::InvalidColor(e.value))?;
        Ok(())
    }

    /// Generate JSON Schema describing the UI-exposed configuration.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ViewConfig)
    }

    /// Load a config preset from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`SyncError::Io`] or [`SyncError::PresetParse`].
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path).map_err(SyncError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SyncError::PresetParse(e.to_string()))
    }

    /// Save a config preset to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`SyncError::Io`] or [`SyncError::PresetParse`].
    pub fn save(&self, path: &Path) -> Result<(), SyncError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SyncError::PresetParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SyncError::Io)?;
        }
        std::fs::write(path, content).map_err(SyncError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let config = ViewConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ViewConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
representation = "surface"

[source]
pdb_id = "1CBS"
"#;
        let config: ViewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.representation, Representation::Surface);
        assert_eq!(config.source, SourceRef::PdbId("1CBS".to_owned()));
        // Everything else should be default
        assert_eq!(config.format, StructureFormat::Bcif);
        assert_eq!(config.default_color, "#888888");
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn unknown_representation_is_rejected() {
        let result: Result<Representation, _> =
            serde_json::from_str("\"ribbon\"");
        assert!(result.is_err());
        let ok: Representation =
            serde_json::from_str("\"ball_and_stick\"").unwrap();
        assert_eq!(ok, Representation::BallAndStick);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result: Result<StructureFormat, _> =
            serde_json::from_str("\"mol2\"");
        assert!(result.is_err());
    }

    #[test]
    fn pdb_id_resolves_per_format() {
        let source = SourceRef::PdbId("1cbs".to_owned());
        assert_eq!(
            source.resolve_url(StructureFormat::Bcif),
            "https://www.ebi.ac.uk/pdbe/entry-files/1cbs.bcif"
        );
        assert_eq!(
            source.resolve_url(StructureFormat::Mmcif),
            "https://files.rcsb.org/download/1CBS.cif"
        );
        assert_eq!(
            source.resolve_url(StructureFormat::Pdb),
            "https://files.rcsb.org/download/1CBS.pdb"
        );
    }

    #[test]
    fn url_source_passes_through() {
        let source =
            SourceRef::Url("https://example.org/structure.cif".to_owned());
        assert_eq!(
            source.resolve_url(StructureFormat::Cif),
            "https://example.org/structure.cif"
        );
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let mut config = ViewConfig::default();
        assert_eq!(config.validate(), Err(ConfigError::EmptySourceUrl));

        config.source = SourceRef::PdbId("1C?S".to_owned());
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidMoleculeId("1C?S".to_owned()))
        );

        config.source = SourceRef::PdbId("1CBS".to_owned());
        config.default_color = "not-a-color".to_owned();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidColor("not-a-color".to_owned()))
        );

        config.default_color = "#66aa66".to_owned();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(ViewConfig::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("source"));
        assert!(props.contains_key("format"));
        assert!(props.contains_key("representation"));
        assert!(props.contains_key("default_color"));
        assert!(props.contains_key("overrides"));

        // Opaque pass-through is not part of the UI schema
        assert!(!props.contains_key("renderer_options"));
    }
}
