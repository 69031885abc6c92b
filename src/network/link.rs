use geo::{MultiLineString, Point};

use crate::geom::{line_length, midpoint};

/// Meters per statute mile, as used for the DISTANCE field.
pub const METERS_PER_MILE: f64 = 1609.34;

/// A highway network link between two endpoint nodes.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: String,
    pub a: i64,
    pub b: i64,
    pub geometry: MultiLineString<f64>,
    pub facility_type: Option<f64>,
    midpoint: Option<Point<f64>>,
    length: f64,
}

impl Link {
    /// Create a link; its id is derived from the ordered endpoint pair.
    pub fn new(a: i64, b: i64, geometry: MultiLineString<f64>) -> Self {
        Self {
            id: Self::link_id(a, b),
            a,
            b,
            midpoint: midpoint(&geometry),
            length: line_length(&geometry),
            geometry,
            facility_type: None,
        }
    }

    /// Attach the link's facility type (FT) code.
    pub fn with_facility_type(mut self, facility_type: Option<f64>) -> Self {
        self.facility_type = facility_type;
        self
    }

    /// The `A_B` identifier shared by highway and transit link tables.
    #[inline] pub fn link_id(a: i64, b: i64) -> String { format!("{a}_{b}") }

    /// Point halfway along the link geometry, `None` if the geometry is empty.
    #[inline] pub fn midpoint(&self) -> Option<Point<f64>> { self.midpoint }

    /// Planar length in layer units.
    #[inline] pub fn length(&self) -> f64 { self.length }

    /// Length in miles, assuming a meter-based projection.
    #[inline] pub fn distance_miles(&self) -> f64 { self.length / METERS_PER_MILE }
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point};

    use super::*;

    #[test]
    fn derived_fields() {
        let link = Link::new(150, 200, MultiLineString(vec![
            line_string![(x: 0.0, y: 5.0), (x: 1609.34, y: 5.0)],
        ]));
        assert_eq!(link.id, "150_200");
        assert_eq!(link.midpoint(), Some(point!(x: 804.67, y: 5.0)));
        assert!((link.distance_miles() - 1.0).abs() < 1e-12);
        assert_eq!(link.facility_type, None);
        assert_eq!(link.with_facility_type(Some(3.0)).facility_type, Some(3.0));
    }

    #[test]
    fn reversed_link_has_its_own_id() {
        assert_ne!(Link::link_id(1, 2), Link::link_id(2, 1));
    }
}
