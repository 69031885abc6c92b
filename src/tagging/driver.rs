use std::fmt;

use geo::Point;
use tracing::{debug, info, warn};

use crate::{
    geom::{Resolution, ZoneId},
    network::{Link, Node},
    tagging::{Assignment, Miss, ReservedZones, Source, ZoneTag},
};

/// Count of assignments per source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagSummary {
    pub contained: usize,
    pub nearest: usize,
    pub reserved: usize,
    pub unmatched: usize,
    pub ineligible: usize,
    pub unresolved: usize,
}

impl TagSummary {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        assignments.iter().fold(Self::default(), |mut summary, assignment| {
            match assignment.source {
                Source::Contained => summary.contained += 1,
                Source::Nearest => summary.nearest += 1,
                Source::Reserved => summary.reserved += 1,
                Source::Unmatched => summary.unmatched += 1,
                Source::Ineligible => summary.ineligible += 1,
                Source::Unresolved => summary.unresolved += 1,
            }
            summary
        })
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.contained + self.nearest + self.reserved + self.unmatched + self.ineligible + self.unresolved
    }
}

impl fmt::Display for TagSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contained, {} nearest, {} reserved, {} unmatched, {} ineligible, {} unresolved",
            self.contained, self.nearest, self.reserved, self.unmatched, self.ineligible, self.unresolved)
    }
}

impl ZoneTag<'_> {
    /// Containment, then the fallback search if enabled, then the miss rule.
    fn locate(&self, point: Option<Point<f64>>) -> Assignment {
        let resolution = point.map_or(Resolution::Unresolved, |pt| self.layer.resolve(&pt, self.fallback_radius));
        match (resolution, self.miss) {
            (Resolution::Contained(zone), _) => Assignment::new(zone, Source::Contained),
            (Resolution::Nearest { zone, .. }, _) => Assignment::new(zone, Source::Nearest),
            (Resolution::Unresolved, Miss::Unresolved) => Assignment::new(ZoneId::UNRESOLVED, Source::Unresolved),
            (Resolution::Unresolved, Miss::Zone(zone)) => Assignment::new(zone, Source::Unmatched),
        }
    }

    /// Zone of a link, located by its midpoint.
    ///
    /// Eligibility is checked first, then the endpoint override; a link with a
    /// reserved endpoint is never located, so it cannot come out unresolved.
    pub fn assign_link(&self, reserved: &ReservedZones, link: &Link) -> Assignment {
        if self.eligible_links.is_some_and(|ids| !ids.contains(&link.id)) {
            return Assignment::new(ZoneId::NONE, Source::Ineligible);
        }
        if self.link_override {
            if let Some(zone) = reserved.link_endpoint(link.a, link.b) {
                return Assignment::new(zone, Source::Reserved);
            }
        }
        self.locate(link.midpoint())
    }

    /// Zone of a node, located by its point.
    pub fn assign_node(&self, reserved: &ReservedZones, node: &Node) -> Assignment {
        match reserved.node_override(node.id, self.reserved_node) {
            Some(zone) => Assignment::new(zone, Source::Reserved),
            None => self.locate(Some(node.geometry)),
        }
    }
}

/// Assign every link exactly one zone, in input order.
pub fn tag_links(tag: &ZoneTag, reserved: &ReservedZones, links: &[Link]) -> Vec<Assignment> {
    let assignments = links.iter()
        .map(|link| {
            let assignment = tag.assign_link(reserved, link);
            if assignment.source == Source::Unresolved {
                match link.midpoint() {
                    Some(pt) => warn!("[tagging] Link {} at ({:.2}, {:.2}) has no {} zone within reach",
                        link.id, pt.x(), pt.y(), tag.column),
                    None => warn!("[tagging] Link {} has empty geometry; {} unresolved", link.id, tag.column),
                }
            }
            assignment
        })
        .collect::<Vec<_>>();

    let summary = TagSummary::from_assignments(&assignments);
    info!("[tagging] {} for {} links: {summary}", tag.column, links.len());
    assignments
}

/// Assign every node exactly one zone, in input order.
pub fn tag_nodes(tag: &ZoneTag, reserved: &ReservedZones, nodes: &[Node]) -> Vec<Assignment> {
    let assignments = nodes.iter()
        .map(|node| {
            let assignment = tag.assign_node(reserved, node);
            if assignment.source == Source::Unresolved {
                warn!("[tagging] Node {} at ({:.2}, {:.2}) has no {} zone within reach",
                    node.id, node.geometry.x(), node.geometry.y(), tag.column);
            }
            assignment
        })
        .collect::<Vec<_>>();

    let summary = TagSummary::from_assignments(&assignments);
    info!("[tagging] {} for {} nodes: {summary}", tag.column, nodes.len());
    debug!("[tagging] reserved threshold {}", reserved.used_zones());
    assignments
}
