use ahash::AHashSet;

use crate::{geom::{ZoneId, ZoneLayer}, tagging::ReservedNode};

/// How a feature got its zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// Its point lies inside the zone.
    Contained,
    /// Nearest zone within the search radius.
    Nearest,
    /// Reserved-zone override from a node id.
    Reserved,
    /// Outside every zone, where that is an expected outcome (toll zones).
    Unmatched,
    /// Link not in the eligible set.
    Ineligible,
    /// No zone found; the feature carries the unresolved sentinel.
    Unresolved,
}

/// The zone assigned to one link or node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub zone: ZoneId,
    pub source: Source,
}

impl Assignment {
    #[inline] pub fn new(zone: ZoneId, source: Source) -> Self { Self { zone, source } }
}

/// What a feature gets when no zone contains it and the fallback finds nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Miss {
    /// Tag with `ZoneId::UNRESOLVED` and warn.
    Unresolved,
    /// Tag with this zone; no warning.
    Zone(ZoneId),
}

/// One zone system to tag links and nodes with, and the rules that go with it.
#[derive(Clone, Copy, Debug)]
pub struct ZoneTag<'a> {
    /// Output column holding the zone id.
    pub column: &'static str,
    pub layer: &'a ZoneLayer,
    /// Nearest-zone search radius; `None` disables the fallback.
    pub fallback_radius: Option<f64>,
    /// Whether reserved link endpoints override the resolved zone.
    pub link_override: bool,
    pub reserved_node: ReservedNode,
    pub miss: Miss,
    /// When set, links outside this id set get `ZoneId::NONE`.
    pub eligible_links: Option<&'a AHashSet<String>>,
}

impl<'a> ZoneTag<'a> {
    /// Traffic analysis zones: fallback on, endpoint override on,
    /// centroid nodes are their own zone.
    pub fn taz(layer: &'a ZoneLayer, search_radius: f64) -> Self {
        Self {
            column: "TAZID",
            layer,
            fallback_radius: Some(search_radius),
            link_override: true,
            reserved_node: ReservedNode::OwnId,
            miss: Miss::Unresolved,
            eligible_links: None,
        }
    }

    /// Toll (HOT) zones: containment only, no endpoint override,
    /// centroid nodes and points outside all zones get zone 0.
    pub fn toll(layer: &'a ZoneLayer) -> Self {
        Self {
            column: "HOT_ZONEID",
            layer,
            fallback_radius: None,
            link_override: false,
            reserved_node: ReservedNode::Fixed(ZoneId::NONE),
            miss: Miss::Zone(ZoneId::NONE),
            eligible_links: None,
        }
    }

    /// Restrict tagging to links whose `A_B` id is in `ids`.
    pub fn with_eligible_links(mut self, ids: &'a AHashSet<String>) -> Self {
        self.eligible_links = Some(ids);
        self
    }
}
