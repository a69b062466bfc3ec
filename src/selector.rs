//! Residue selector grammar.
//!
//! A selector addresses one residue under a specific numbering scheme:
//! `"A:42"` is chain `A`, position 42 in label (canonical) numbering;
//! `"auth:B:100"` is chain `B`, position 100 in author numbering. These
//! strings are the shared vocabulary between the 3D view, the linear
//! tracks, and the topology diagram, so parsing is total: anything that
//! does not match the grammar is rejected, never coerced.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal prefix selecting author numbering.
const AUTH_PREFIX: &str = "auth:";

/// Residue numbering scheme.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// Canonical sequence numbering from the data source's reference scheme.
    Label,
    /// Author-assigned numbering, which may differ from label numbering.
    Auth,
}

/// A single residue, addressed by chain, position, and numbering scheme.
///
/// Two selectors are equal iff all three fields match; a label- and an
/// auth-numbered selector are distinct values even when they happen to
/// name the same physical residue (only the renderer, which knows the
/// structure, can tell).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResidueSelector {
    /// Chain identifier (one or more non-colon, non-whitespace characters).
    pub chain: String,
    /// Sequence position (non-negative).
    pub position: u32,
    /// Numbering scheme the chain/position pair is expressed in.
    pub numbering: Numbering,
}

/// Why a selector string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorParseError {
    /// Input was the empty string.
    Empty,
    /// No colon separating chain from position.
    MissingColon(String),
    /// Chain part was empty (input began with a colon).
    EmptyChain(String),
    /// Position part was empty or not a non-negative integer literal.
    InvalidPosition(String),
    /// Input contained whitespace (selectors are never trimmed).
    Whitespace(String),
}

impl fmt::Display for SelectorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::MissingColon(s) => {
                write!(f, "selector {s:?} has no chain/position separator")
            }
            Self::EmptyChain(s) => {
                write!(f, "selector {s:?} has an empty chain")
            }
            Self::InvalidPosition(s) => {
                write!(f, "selector {s:?} has a non-numeric position")
            }
            Self::Whitespace(s) => {
                write!(f, "selector {s:?} contains whitespace")
            }
        }
    }
}

impl std::error::Error for SelectorParseError {}

impl ResidueSelector {
    /// Construct a label-numbered selector.
    #[must_use]
    pub fn label(chain: &str, position: u32) -> Self {
        Self {
            chain: chain.to_owned(),
            position,
            numbering: Numbering::Label,
        }
    }

    /// Construct an auth-numbered selector.
    #[must_use]
    pub fn auth(chain: &str, position: u32) -> Self {
        Self {
            chain: chain.to_owned(),
            position,
            numbering: Numbering::Auth,
        }
    }

    /// Parse a selector string.
    ///
    /// Grammar: optional literal `auth:` prefix, then `<chain>:<position>`
    /// where `chain` is one or more non-colon characters and `position` is
    /// a non-negative integer literal. No whitespace is trimmed; input
    /// containing whitespace is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorParseError`] for any input not matching the
    /// grammar.
    pub fn parse(text: &str) -> Result<Self, SelectorParseError> {
        if text.is_empty() {
            return Err(SelectorParseError::Empty);
        }
        if text.chars().any(char::is_whitespace) {
            return Err(SelectorParseError::Whitespace(text.to_owned()));
        }
        let (numbering, rest) = text.strip_prefix(AUTH_PREFIX).map_or(
            (Numbering::Label, text),
            |stripped| (Numbering::Auth, stripped),
        );
        let Some((chain, position)) = rest.split_once(':') else {
            return Err(SelectorParseError::MissingColon(text.to_owned()));
        };
        if chain.is_empty() {
            return Err(SelectorParseError::EmptyChain(text.to_owned()));
        }
        if position.is_empty() || !position.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(SelectorParseError::InvalidPosition(text.to_owned()));
        }
        let position = position
            .parse::<u32>()
            .map_err(|_| SelectorParseError::InvalidPosition(text.to_owned()))?;
        Ok(Self {
            chain: chain.to_owned(),
            position,
            numbering,
        })
    }

    /// Sort key realizing the style precedence order: label entries sort
    /// before auth entries so a renderer applying entries in sequence ends
    /// on the auth value when both target the same physical residue.
    pub(crate) fn precedence_key(&self) -> (Numbering, &str, u32) {
        (self.numbering, &self.chain, self.position)
    }
}

impl fmt::Display for ResidueSelector {
    /// Serialized form; the left inverse of [`ResidueSelector::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.numbering {
            Numbering::Label => write!(f, "{}:{}", self.chain, self.position),
            Numbering::Auth => {
                write!(f, "{AUTH_PREFIX}{}:{}", self.chain, self.position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_selector() {
        assert_eq!(
            ResidueSelector::parse("A:42").unwrap(),
            ResidueSelector::label("A", 42)
        );
    }

    #[test]
    fn parses_auth_selector() {
        assert_eq!(
            ResidueSelector::parse("auth:B:100").unwrap(),
            ResidueSelector::auth("B", 100)
        );
    }

    #[test]
    fn parses_multi_character_chain() {
        assert_eq!(
            ResidueSelector::parse("AB1:7").unwrap(),
            ResidueSelector::label("AB1", 7)
        );
    }

    #[test]
    fn rejects_missing_colon() {
        assert_eq!(
            ResidueSelector::parse("A"),
            Err(SelectorParseError::MissingColon("A".to_owned()))
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(ResidueSelector::parse(""), Err(SelectorParseError::Empty));
    }

    #[test]
    fn rejects_empty_chain() {
        assert_eq!(
            ResidueSelector::parse(":42"),
            Err(SelectorParseError::EmptyChain(":42".to_owned()))
        );
        assert_eq!(
            ResidueSelector::parse("auth::42"),
            Err(SelectorParseError::EmptyChain("auth::42".to_owned()))
        );
    }

    #[test]
    fn rejects_non_numeric_position() {
        assert_eq!(
            ResidueSelector::parse("A:x"),
            Err(SelectorParseError::InvalidPosition("A:x".to_owned()))
        );
        assert_eq!(
            ResidueSelector::parse("A:-5"),
            Err(SelectorParseError::InvalidPosition("A:-5".to_owned()))
        );
        assert_eq!(
            ResidueSelector::parse("A:"),
            Err(SelectorParseError::InvalidPosition("A:".to_owned()))
        );
    }

    #[test]
    fn rejects_trailing_garbage() {
        // The extra segment lands in the position part and fails there.
        assert_eq!(
            ResidueSelector::parse("A:1:2"),
            Err(SelectorParseError::InvalidPosition("A:1:2".to_owned()))
        );
    }

    #[test]
    fn rejects_untrimmed_whitespace() {
        assert_eq!(
            ResidueSelector::parse(" A:42"),
            Err(SelectorParseError::Whitespace(" A:42".to_owned()))
        );
        assert_eq!(
            ResidueSelector::parse("A:42 "),
            Err(SelectorParseError::Whitespace("A:42 ".to_owned()))
        );
    }

    #[test]
    fn auth_prefix_is_strict() {
        // "auth:5" is the prefix plus "5", which lacks a colon; it is not
        // read as chain "auth", position 5.
        assert_eq!(
            ResidueSelector::parse("auth:5"),
            Err(SelectorParseError::MissingColon("auth:5".to_owned()))
        );
        // An auth-numbered chain literally named "auth" is expressible.
        assert_eq!(
            ResidueSelector::parse("auth:auth:5").unwrap(),
            ResidueSelector::auth("auth", 5)
        );
    }

    #[test]
    fn format_round_trips() {
        for text in ["A:42", "auth:B:100", "HETA:0", "auth:auth:5"] {
            let parsed = ResidueSelector::parse(text).unwrap();
            assert_eq!(parsed.to_string(), text);
            assert_eq!(
                ResidueSelector::parse(&parsed.to_string()).unwrap(),
                parsed
            );
        }
    }

    #[test]
    fn label_and_auth_are_distinct() {
        assert_ne!(
            ResidueSelector::label("A", 42),
            ResidueSelector::auth("A", 42)
        );
    }
}
