use geo::{Contains, Distance, Euclidean, MultiPolygon, Point};
use rstar::AABB;

use crate::geom::{BoundingBox, ZoneId, ZoneLayer};

/// Outcome of locating a point against a zone layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The point lies in the interior of this zone.
    Contained(ZoneId),
    /// No zone contains the point; this is the closest one within the search radius.
    Nearest { zone: ZoneId, distance: f64 },
    /// No zone contains the point and none lies within the search radius.
    Unresolved,
}

impl Resolution {
    /// The resolved zone, if any.
    #[inline]
    pub fn zone(&self) -> Option<ZoneId> {
        match *self {
            Self::Contained(zone) | Self::Nearest { zone, .. } => Some(zone),
            Self::Unresolved => None,
        }
    }
}

/// Euclidean distance from `point` to the closest part of `shape` (zero inside).
fn distance_to(point: &Point<f64>, shape: &MultiPolygon<f64>) -> f64 {
    shape.0.iter()
        .map(|polygon| Euclidean.distance(point, polygon))
        .fold(f64::INFINITY, f64::min)
}

impl ZoneLayer {
    /// Find the zone whose interior contains `point`.
    ///
    /// Points on a shared boundary are contained by neither neighbour. If zones
    /// overlap, the one that comes first in the layer wins.
    pub fn containing(&self, point: &Point<f64>) -> Option<ZoneId> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        self.query(&envelope)
            .map(BoundingBox::idx)
            .filter(|&i| self.shapes()[i].contains(point))
            .min()
            .map(|i| self.ids()[i])
    }

    /// Find the zone closest to `point` among those within `radius`.
    ///
    /// Candidates are pruned to zones whose bounding boxes meet the radius
    /// envelope, then ranked by exact distance. Equidistant zones resolve to
    /// the lowest zone id.
    pub fn nearest_within(&self, point: &Point<f64>, radius: f64) -> Option<(ZoneId, f64)> {
        let envelope = AABB::from_corners(
            [point.x() - radius, point.y() - radius],
            [point.x() + radius, point.y() + radius],
        );
        self.query(&envelope)
            .map(|bb| (self.ids()[bb.idx()], distance_to(point, &self.shapes()[bb.idx()])))
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }

    /// Containment first; the nearest-zone search runs only when containment
    /// fails and a search radius is given.
    pub fn resolve(&self, point: &Point<f64>, radius: Option<f64>) -> Resolution {
        if let Some(zone) = self.containing(point) {
            return Resolution::Contained(zone);
        }
        radius
            .and_then(|radius| self.nearest_within(point, radius))
            .map_or(Resolution::Unresolved, |(zone, distance)| Resolution::Nearest { zone, distance })
    }
}

#[cfg(test)]
mod tests {
    use geo::{Rect, coord, point};

    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 }).to_polygon()])
    }

    fn two_squares() -> ZoneLayer {
        ZoneLayer::new("taz", vec![
            (ZoneId(1), square(0.0, 0.0, 10.0, 10.0)),
            (ZoneId(2), square(10.0, 0.0, 20.0, 10.0)),
        ]).unwrap()
    }

    #[test]
    fn interior_point_is_contained() {
        let layer = two_squares();
        assert_eq!(layer.containing(&point!(x: 5.0, y: 5.0)), Some(ZoneId(1)));
        assert_eq!(layer.containing(&point!(x: 15.0, y: 2.0)), Some(ZoneId(2)));
        assert_eq!(layer.containing(&point!(x: 25.0, y: 5.0)), None);
    }

    #[test]
    fn shared_boundary_falls_back_to_lowest_id() {
        let layer = two_squares();
        let on_edge = point!(x: 10.0, y: 5.0);
        assert_eq!(layer.containing(&on_edge), None);
        assert_eq!(layer.resolve(&on_edge, Some(1.0)), Resolution::Nearest { zone: ZoneId(1), distance: 0.0 });
    }

    #[test]
    fn overlapping_zones_prefer_layer_order() {
        let layer = ZoneLayer::new("taz", vec![
            (ZoneId(9), square(0.0, 0.0, 10.0, 10.0)),
            (ZoneId(3), square(5.0, 5.0, 15.0, 15.0)),
        ]).unwrap();
        assert_eq!(layer.containing(&point!(x: 7.0, y: 7.0)), Some(ZoneId(9)));
    }

    #[test]
    fn nearest_picks_closest_boundary() {
        let layer = two_squares();
        let (zone, distance) = layer.nearest_within(&point!(x: 25.0, y: 5.0), 10.0).unwrap();
        assert_eq!(zone, ZoneId(2));
        assert!((distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn bbox_hit_beyond_radius_is_not_a_match() {
        // envelope corner reaches the square's bbox, true distance is 10 * sqrt(2)
        let layer = ZoneLayer::new("taz", vec![(ZoneId(4), square(0.0, 0.0, 10.0, 10.0))]).unwrap();
        assert_eq!(layer.nearest_within(&point!(x: 20.0, y: 20.0), 10.0), None);
        assert!(layer.nearest_within(&point!(x: 20.0, y: 20.0), 15.0).is_some());
    }

    #[test]
    fn far_point_is_unresolved() {
        let layer = two_squares();
        assert_eq!(layer.resolve(&point!(x: 1000.0, y: 1000.0), Some(10.0)), Resolution::Unresolved);
        assert_eq!(layer.resolve(&point!(x: 25.0, y: 5.0), None), Resolution::Unresolved);
        assert_eq!(Resolution::Unresolved.zone(), None);
    }

    #[test]
    fn containment_wins_over_nearer_neighbour() {
        // a point just inside zone 1 is also within radius of zone 2
        let layer = two_squares();
        assert_eq!(layer.resolve(&point!(x: 9.9, y: 5.0), Some(100.0)), Resolution::Contained(ZoneId(1)));
    }
}
