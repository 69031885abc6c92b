use geo::{Area, BooleanOps, BoundingRect, Buffer, LineString, MultiLineString, MultiPoint, MultiPolygon, Point};
use rstar::{RTree, AABB};

use crate::geom::BoundingBox;

/// Dissolved area within walking distance of a set of features.
#[derive(Debug, Clone)]
pub(crate) struct Coverage {
    polygons: MultiPolygon<f64>,
    rtree: RTree<BoundingBox>,
}

impl Coverage {
    fn new(polygons: MultiPolygon<f64>) -> Self {
        let rtree = RTree::bulk_load(
            polygons.0.iter().enumerate()
                .filter_map(|(i, polygon)| polygon.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                .collect()
        );
        Self { polygons, rtree }
    }

    /// Buffer every line by `distance` (round caps and joins) and dissolve.
    pub fn around_lines<'a>(lines: impl IntoIterator<Item = &'a MultiLineString<f64>>, distance: f64) -> Self {
        let parts = lines.into_iter()
            .flat_map(|line| line.0.iter().cloned())
            .filter(|part: &LineString<f64>| !part.0.is_empty())
            .collect::<Vec<_>>();
        if parts.is_empty() { return Self::new(MultiPolygon(vec![])) }
        Self::new(MultiLineString(parts).buffer(distance))
    }

    /// Buffer every point by `distance` and dissolve.
    pub fn around_points(points: impl IntoIterator<Item = Point<f64>>, distance: f64) -> Self {
        let points = MultiPoint(points.into_iter().collect());
        if points.0.is_empty() { return Self::new(MultiPolygon(vec![])) }
        Self::new(points.buffer(distance))
    }

    /// Total covered area.
    pub fn area(&self) -> f64 {
        self.polygons.unsigned_area()
    }

    /// Area of `zone` that lies inside the coverage.
    pub fn area_within(&self, zone: &MultiPolygon<f64>) -> f64 {
        let Some(rect) = zone.bounding_rect() else { return 0.0 };
        let envelope = AABB::from_corners(rect.min().into(), rect.max().into());
        let nearby = self.rtree.locate_in_envelope_intersecting(&envelope)
            .map(|bb| self.polygons.0[bb.idx()].clone())
            .collect::<Vec<_>>();
        if nearby.is_empty() { return 0.0 }
        zone.intersection(&MultiPolygon(nearby)).unsigned_area()
    }
}
