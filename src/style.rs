//! Override resolution: default color plus selector-keyed overrides,
//! composed into an ordered per-residue style table.
//!
//! The resolver never sees the structure itself; it produces a purely
//! declarative table and leaves residue-existence validation to the
//! external renderer. Malformed entries are dropped and batch-reported,
//! never fatal.

use std::collections::HashMap;
use std::fmt;

use crate::color::Color;
use crate::selector::ResidueSelector;

/// One override that was dropped during resolution, for batch reporting
/// to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideWarning {
    /// The offending override-map key.
    pub key: String,
    /// Human-readable reason the entry was dropped.
    pub reason: String,
}

impl fmt::Display for OverrideWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "override {:?} dropped: {}", self.key, self.reason)
    }
}

/// A single resolved per-residue style entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleEntry {
    /// The residue this entry targets.
    pub selector: ResidueSelector,
    /// The color layered onto that residue.
    pub color: Color,
}

/// The composed style table: an implicit all-residues base layer plus
/// explicit per-residue entries in application order.
///
/// Entries are ordered label-numbered first, then auth-numbered (each
/// group sorted by chain, then position), so a renderer applying them in
/// sequence realizes the precedence rule auth > label > default when two
/// selectors of different schemes turn out to address the same physical
/// residue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleTable {
    /// Base color applied to every residue.
    pub base: Color,
    /// Per-residue overrides, in application order.
    pub entries: Vec<StyleEntry>,
}

impl StyleTable {
    /// Compose `base` with `overrides` (selector string → CSS color
    /// string).
    ///
    /// Entries whose key fails the selector grammar or whose value is not
    /// a valid CSS color are dropped, logged, and returned as warnings.
    /// Resolution is deterministic and idempotent: map iteration order
    /// never leaks into the table.
    #[must_use]
    pub fn resolve(
        base: Color,
        overrides: &HashMap<String, String>,
    ) -> (Self, Vec<OverrideWarning>) {
        let mut entries = Vec::with_capacity(overrides.len());
        let mut warnings = Vec::new();

        for (key, value) in overrides {
            let selector = match ResidueSelector::parse(key) {
                Ok(s) => s,
                Err(e) => {
                    warnings.push(OverrideWarning {
                        key: key.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let color = match Color::parse(value) {
                Ok(c) => c,
                Err(e) => {
                    warnings.push(OverrideWarning {
                        key: key.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            entries.push(StyleEntry { selector, color });
        }

        // Deterministic order independent of map iteration: label before
        // auth, then chain, then position. Distinct raw keys can collide
        // on the same selector (e.g. "A:42" and "A:042"); keep the last
        // in sort order so the result is still deterministic.
        entries.sort_by(|a, b| {
            a.selector
                .precedence_key()
                .cmp(&b.selector.precedence_key())
                .then_with(|| a.color.to_css().cmp(&b.color.to_css()))
        });
        entries.dedup_by(|next, prev| {
            if next.selector == prev.selector {
                prev.color = next.color;
                true
            } else {
                false
            }
        });

        for w in &warnings {
            log::warn!("{w}");
        }

        (Self { base, entries }, warnings)
    }

    /// Look up the effective color for one selector, falling back to the
    /// base layer.
    #[must_use]
    pub fn color_for(&self, selector: &ResidueSelector) -> Color {
        self.entries
            .iter()
            .find(|e| &e.selector == selector)
            .map_or(self.base, |e| e.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Numbering;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn layers_override_on_default() {
        let base = Color::parse("#66aa66").unwrap();
        let (table, warnings) =
            StyleTable::resolve(base, &overrides(&[("A:42", "#cc3399")]));
        assert!(warnings.is_empty());
        assert_eq!(table.base, base);
        assert_eq!(table.entries.len(), 1);
        assert_eq!(
            table.color_for(&ResidueSelector::label("A", 42)),
            Color::parse("#cc3399").unwrap()
        );
        // Every other residue stays on the base layer
        assert_eq!(table.color_for(&ResidueSelector::label("A", 43)), base);
        assert_eq!(table.color_for(&ResidueSelector::auth("A", 42)), base);
    }

    #[test]
    fn malformed_entries_dropped_and_reported() {
        let (table, warnings) = StyleTable::resolve(
            Color::BLACK,
            &overrides(&[("bad", "#fff"), ("A:1", "#000")]),
        );
        assert_eq!(table.entries.len(), 1);
        assert_eq!(
            table.entries[0].selector,
            ResidueSelector::label("A", 1)
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "bad");
    }

    #[test]
    fn malformed_color_value_dropped_and_reported() {
        let (table, warnings) = StyleTable::resolve(
            Color::WHITE,
            &overrides(&[("A:1", "chartreuse"), ("A:2", "#zzz")]),
        );
        assert_eq!(table.entries.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "A:2");
    }

    #[test]
    fn auth_entries_order_after_label_entries() {
        let (table, _) = StyleTable::resolve(
            Color::WHITE,
            &overrides(&[
                ("auth:A:10", "#111111"),
                ("B:5", "#222222"),
                ("A:7", "#333333"),
                ("auth:B:1", "#444444"),
            ]),
        );
        let schemes: Vec<Numbering> = table
            .entries
            .iter()
            .map(|e| e.selector.numbering)
            .collect();
        assert_eq!(
            schemes,
            [
                Numbering::Label,
                Numbering::Label,
                Numbering::Auth,
                Numbering::Auth
            ]
        );
        // Within a scheme: chain, then position
        assert_eq!(table.entries[0].selector, ResidueSelector::label("A", 7));
        assert_eq!(table.entries[1].selector, ResidueSelector::label("B", 5));
        assert_eq!(table.entries[2].selector, ResidueSelector::auth("A", 10));
        assert_eq!(table.entries[3].selector, ResidueSelector::auth("B", 1));
    }

    #[test]
    fn resolve_is_idempotent() {
        let map = overrides(&[
            ("A:42", "#cc3399"),
            ("auth:B:100", "tomato"),
            ("broken", "#fff"),
        ]);
        let base = Color::parse("#66aa66").unwrap();
        let (first, w1) = StyleTable::resolve(base, &map);
        let (second, w2) = StyleTable::resolve(base, &map);
        assert_eq!(first, second);
        assert_eq!(w1, w2);
    }

    #[test]
    fn colliding_raw_keys_dedupe_deterministically() {
        // "A:042" parses to the same selector as "A:42"
        let map = overrides(&[("A:42", "#000000"), ("A:042", "#ffffff")]);
        let (table, warnings) = StyleTable::resolve(Color::WHITE, &map);
        assert!(warnings.is_empty());
        assert_eq!(table.entries.len(), 1);
        // Last in sort order (sorted secondarily by color) wins
        assert_eq!(table.entries[0].color, Color::WHITE);
    }
}
