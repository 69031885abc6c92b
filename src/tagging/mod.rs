//! Zone tagging of highway links and nodes.
//!
//! A [`ZoneTag`] bundles a zone layer with the rules of one zone system
//! (fallback radius, endpoint override, reserved-node outcome). The driver
//! applies it to every feature and [`run_tagging`] wires a whole run together
//! from a [`RunConfig`](crate::RunConfig).

mod driver;
mod output;
mod rule;
mod run;
mod tag;

pub use driver::{TagSummary, tag_links, tag_nodes};
pub use rule::{ReservedNode, ReservedZones};
pub use run::{TagReport, output_stems, run_tagging};
pub use tag::{Assignment, Miss, Source, ZoneTag};
