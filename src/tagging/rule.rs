use crate::geom::ZoneId;

/// Zone given to a node whose id is itself a reserved zone number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReservedNode {
    /// The node's own id (TAZ tagging: centroids are their own zone).
    OwnId,
    /// A fixed zone (toll tagging: centroids are in no toll zone).
    Fixed(ZoneId),
}

/// Node ids at or below `used_zones` denote reserved, non-geographic zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReservedZones {
    used_zones: i64,
}

impl ReservedZones {
    #[inline] pub fn new(used_zones: i64) -> Self { Self { used_zones } }

    #[inline] pub fn used_zones(&self) -> i64 { self.used_zones }

    #[inline] pub fn is_reserved(&self, id: i64) -> bool { id <= self.used_zones }

    /// The reserved zone a link takes from its endpoints, A before B.
    pub fn link_endpoint(&self, a: i64, b: i64) -> Option<ZoneId> {
        [a, b].into_iter().find(|&id| self.is_reserved(id)).map(ZoneId)
    }

    /// The zone a reserved node takes, or `None` if `id` is not reserved.
    pub fn node_override(&self, id: i64, rule: ReservedNode) -> Option<ZoneId> {
        if !self.is_reserved(id) { return None }
        Some(match rule {
            ReservedNode::OwnId => ZoneId(id),
            ReservedNode::Fixed(zone) => zone,
        })
    }
}
