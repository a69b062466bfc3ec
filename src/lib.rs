// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! View synchronization engine for multi-view protein visualization.
//!
//! Molsync keeps three complementary views of one protein — a 3D
//! structure renderer, linear (1D) annotation tracks, and a topology
//! diagram — consistent under a single declarative configuration, and
//! translates interaction in one view into addressable, structurally
//! meaningful selections usable by the others. Rendering itself is
//! delegated to external viewer components behind the
//! [`adapter::ViewAdapter`] boundary.
//!
//! # Key entry points
//!
//! - [`config::ViewConfig`] - the declarative configuration surface
//!   (source, format, representation, colors, overrides)
//! - [`rebuild::RebuildController`] - decides rebuild vs. no-op per
//!   configuration change and gates out-of-order async results by
//!   generation
//! - [`selector::ResidueSelector`] - the residue addressing grammar
//!   shared by all views (`"A:42"`, `"auth:B:100"`)
//! - [`selection::SelectionEvent`] - canonical selections normalized
//!   from raw viewer interaction payloads
//!
//! # Architecture
//!
//! Configuration flows one way: the host hands a
//! [`config::ViewConfig`] to [`rebuild::RebuildController::submit`],
//! which resolves the style layers ([`style`]), builds an immutable
//! [`scene::SceneDescription`] ([`scene`]), and applies it through the
//! adapter when it differs structurally from the live one. Interaction
//! flows back the other way: raw renderer payloads are normalized
//! ([`selection`]) and republished to sibling views. The engine never
//! watches anything reactively; it only responds to the values it is
//! handed.

pub mod adapter;
pub mod color;
pub mod config;
pub mod error;
pub mod rebuild;
pub mod scene;
pub mod selection;
pub mod selector;
pub mod style;
