//! Crate-level error types.
//!
//! The taxonomy follows the engine's propagation policy: selector and
//! color problems inside the override map are *warnings* (filtered and
//! batch-reported, see [`crate::style`]), configuration problems are
//! rejected before any rebuild is attempted, and load failures are fatal
//! to a single rebuild attempt only.

use std::fmt;

/// An invalid configuration field. The offending value is rejected, never
/// "fixed up" with a guessed default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `default_color` is not a recognized CSS color.
    InvalidColor(String),
    /// The source URL is empty.
    EmptySourceUrl,
    /// The molecule identifier is empty or not alphanumeric.
    InvalidMoleculeId(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(value) => {
                write!(f, "invalid default color {value:?}")
            }
            Self::EmptySourceUrl => write!(f, "source URL is empty"),
            Self::InvalidMoleculeId(value) => {
                write!(f, "invalid molecule identifier {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A structure fetch/parse failure reported by the external renderer.
///
/// Fatal to the rebuild attempt that triggered it; the previously applied
/// scene, if any, stays visible until a new configuration is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// Renderer-reported failure description.
    pub message: String,
}

impl LoadError {
    /// Wrap a renderer-reported failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "structure load error: {}", self.message)
    }
}

impl std::error::Error for LoadError {}

/// Errors produced by the molsync crate.
#[derive(Debug)]
pub enum SyncError {
    /// Invalid configuration field.
    Config(ConfigError),
    /// Structure load failure from the external renderer.
    Load(LoadError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML preset parsing/serialization failure.
    PresetParse(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Load(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::PresetParse(msg) => {
                write!(f, "preset parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::PresetParse(_) => None,
        }
    }
}

impl From<ConfigError> for SyncError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<LoadError> for SyncError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<std::io::Error> for SyncError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
