use geo::Point;

/// A highway network node. Ids up to the reserved-zone threshold are zone centroids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub geometry: Point<f64>,
}

impl Node {
    #[inline] pub fn new(id: i64, geometry: Point<f64>) -> Self { Self { id, geometry } }
}
