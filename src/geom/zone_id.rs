use std::fmt;

/// Identifier of a zone (TAZ or toll zone) as written to the model's input tables.
///
/// Network node ids share this integer space: a node id at or below the
/// reserved-zone threshold doubles as the id of a non-geographic zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub i64);

impl ZoneId {
    /// Sentinel for a feature with no containing and no nearby zone polygon.
    pub const UNRESOLVED: Self = Self(-1);

    /// "No zone": outside every toll zone, or a reserved toll-zone node.
    pub const NONE: Self = Self(0);

    #[inline] pub fn is_unresolved(self) -> bool { self == Self::UNRESOLVED }
}

impl From<i64> for ZoneId {
    fn from(id: i64) -> Self { Self(id) }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unresolved() {
            write!(f, "ZoneId(UNRESOLVED)")
        } else {
            write!(f, "ZoneId({})", self.0)
        }
    }
}
