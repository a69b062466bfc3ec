//! Normalization of viewer-native interaction payloads into canonical
//! residue selections.
//!
//! The external renderer reports clicks and range selections in its own
//! internal addressing, typically carrying both label- and auth-numbering
//! for each residue plus chain and entity identifiers. The normalizer
//! maps every reported residue into [`ResidueSelector`] form for both
//! schemes when available, preserving interaction order (range selections
//! are ordered), and drops entries that resolve to neither scheme without
//! failing the whole event.

use serde::{Deserialize, Serialize};

use crate::selector::{Numbering, ResidueSelector};

/// One residue as reported by the renderer, in its native field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawResidue {
    /// Canonical chain identifier.
    pub label_asym_id: Option<String>,
    /// Canonical sequence position.
    pub label_seq_id: Option<i64>,
    /// Author chain identifier.
    pub auth_asym_id: Option<String>,
    /// Author sequence position.
    pub auth_seq_id: Option<i64>,
    /// Entity identifier, used only for diagnostics.
    pub entity_id: Option<String>,
}

/// A raw interaction event from the renderer: the residues implicated by
/// one click or range selection, in interaction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInteraction {
    /// Implicated residues, as reported.
    pub residues: Vec<RawResidue>,
}

/// One residue of a normalized selection, under every numbering scheme
/// the renderer could resolve. At least one of the two is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueRef {
    /// Label-numbered selector, when resolvable.
    pub label: Option<ResidueSelector>,
    /// Auth-numbered selector, when resolvable.
    pub auth: Option<ResidueSelector>,
}

impl ResidueRef {
    /// The selector for `numbering`, if that scheme was resolvable.
    #[must_use]
    pub fn selector(&self, numbering: Numbering) -> Option<&ResidueSelector> {
        match numbering {
            Numbering::Label => self.label.as_ref(),
            Numbering::Auth => self.auth.as_ref(),
        }
    }
}

/// An ordered, canonical residue selection produced from one interaction.
///
/// Broadcast read-only to consumers; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionEvent {
    /// Selected residues in interaction order.
    pub residues: Vec<ResidueRef>,
}

impl SelectionEvent {
    /// Normalize a raw renderer payload.
    ///
    /// Entries that resolve to neither numbering scheme are dropped with
    /// a warning; the event itself always succeeds.
    #[must_use]
    pub fn normalize(raw: &RawInteraction) -> Self {
        let residues = raw
            .residues
            .iter()
            .filter_map(|entry| {
                let resolved = resolve(entry);
                if resolved.is_none() {
                    log::warn!(
                        "dropping unresolvable selection entry \
                         (entity {:?})",
                        entry.entity_id
                    );
                }
                resolved
            })
            .collect();
        Self { residues }
    }

    /// Whether the interaction implicated no resolvable residues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Map one raw entry to a canonical reference, or `None` if neither
/// scheme yields a valid selector.
fn resolve(entry: &RawResidue) -> Option<ResidueRef> {
    let label = scheme_selector(
        entry.label_asym_id.as_deref(),
        entry.label_seq_id,
        Numbering::Label,
    );
    let auth = scheme_selector(
        entry.auth_asym_id.as_deref(),
        entry.auth_seq_id,
        Numbering::Auth,
    );
    if label.is_none() && auth.is_none() {
        return None;
    }
    Some(ResidueRef { label, auth })
}

fn scheme_selector(
    chain: Option<&str>,
    position: Option<i64>,
    numbering: Numbering,
) -> Option<ResidueSelector> {
    let chain = chain?;
    let position = u32::try_from(position?).ok()?;
    // The chain must survive the selector grammar (round-trip safety):
    // non-empty, no colon, no whitespace.
    if chain.is_empty()
        || chain.contains(':')
        || chain.chars().any(char::is_whitespace)
    {
        return None;
    }
    Some(ResidueSelector {
        chain: chain.to_owned(),
        position,
        numbering,
    })
}

/// A consumer of normalized selection events (a track pane, the topology
/// view, or the host application).
pub trait SelectionSink {
    /// Receive one selection event. Events are shared read-only; sinks
    /// must not assume exclusive ownership of their contents.
    fn on_selection(&mut self, event: &SelectionEvent);
}

/// Republishes selection events to every registered sibling view, in
/// registration order.
#[derive(Default)]
pub struct SelectionBus {
    sinks: Vec<Box<dyn SelectionSink>>,
}

impl SelectionBus {
    /// An empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer. Registration order is delivery order.
    pub fn register(&mut self, sink: Box<dyn SelectionSink>) {
        self.sinks.push(sink);
    }

    /// Normalize `raw` and deliver the event to every sink. Returns the
    /// event for the caller's own use.
    pub fn publish(&mut self, raw: &RawInteraction) -> SelectionEvent {
        let event = SelectionEvent::normalize(raw);
        for sink in &mut self.sinks {
            sink.on_selection(&event);
        }
        event
    }
}
