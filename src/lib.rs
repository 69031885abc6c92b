#![doc = "Zone tagging for travel-model highway networks"]
mod common;
mod config;
mod error;
mod geom;
mod network;
mod tagging;
mod walk;

#[doc(inline)]
pub use config::{FieldNames, Layers, LinkOrder, RunConfig, TagMode, WalkConfig};

#[doc(inline)]
pub use error::TagError;

#[doc(inline)]
pub use geom::{Resolution, ZoneId, ZoneLayer};

#[doc(inline)]
pub use network::{Link, METERS_PER_MILE, Node};

#[doc(inline)]
pub use tagging::{
    Assignment, Miss, ReservedNode, ReservedZones, Source, TagReport, TagSummary, ZoneTag,
    output_stems, run_tagging, tag_links, tag_nodes,
};

#[doc(inline)]
pub use walk::{WALK_BUFFER_STEM, WalkReport, WalkShare, run_walk_buffer};
