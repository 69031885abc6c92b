use std::path::Path;

use geo::{Coord, LineString, MultiLineString, MultiPolygon, Point, Polygon, Winding};
use shapefile::{self as shp, record::traits::HasXY};

use crate::error::TagError;

fn unexpected_shape(layer: &Path, index: usize, expected: &'static str, shape: &shp::Shape) -> TagError {
    TagError::UnexpectedShape {
        layer: layer.display().to_string(),
        record: index,
        expected,
        found: format!("{:?}", shape.shapetype()),
    }
}

#[inline]
fn coords<P: HasXY>(points: &[P]) -> Vec<Coord<f64>> {
    points.iter().map(|pt| Coord { x: pt.x(), y: pt.y() }).collect()
}

/// Group rings into polygons. Shapefile stores each outer ring followed by its holes.
fn rings_to_multipolygon<P: HasXY>(rings: &[shp::PolygonRing<P>]) -> MultiPolygon<f64> {
    let mut polys: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in rings {
        match ring {
            shp::PolygonRing::Outer(points) => {
                if let Some(previous) = exterior.replace(LineString::new(coords(points))) {
                    polys.push(Polygon::new(previous, std::mem::take(&mut holes)));
                }
            }
            shp::PolygonRing::Inner(points) => holes.push(LineString::new(coords(points))),
        }
    }
    if let Some(last) = exterior {
        polys.push(Polygon::new(last, holes));
    }
    MultiPolygon(polys)
}

#[inline]
fn parts_to_multilinestring<P: HasXY>(parts: &[Vec<P>]) -> MultiLineString<f64> {
    MultiLineString(parts.iter().map(|part| LineString::new(coords(part))).collect())
}

/// Convert a polygon record (Z and M values are dropped) into a geo::MultiPolygon<f64>.
pub(crate) fn shape_to_multipolygon(layer: &Path, index: usize, shape: shp::Shape) -> Result<MultiPolygon<f64>, TagError> {
    match &shape {
        shp::Shape::Polygon(polygon) => Ok(rings_to_multipolygon(polygon.rings())),
        shp::Shape::PolygonZ(polygon) => Ok(rings_to_multipolygon(polygon.rings())),
        shp::Shape::PolygonM(polygon) => Ok(rings_to_multipolygon(polygon.rings())),
        _ => Err(unexpected_shape(layer, index, "Polygon", &shape)),
    }
}

/// Convert a polyline record into a geo::MultiLineString<f64>, one line per part.
pub(crate) fn shape_to_multilinestring(layer: &Path, index: usize, shape: shp::Shape) -> Result<MultiLineString<f64>, TagError> {
    match &shape {
        shp::Shape::Polyline(line) => Ok(parts_to_multilinestring(line.parts())),
        shp::Shape::PolylineZ(line) => Ok(parts_to_multilinestring(line.parts())),
        shp::Shape::PolylineM(line) => Ok(parts_to_multilinestring(line.parts())),
        _ => Err(unexpected_shape(layer, index, "Polyline", &shape)),
    }
}

/// Convert a point record into a geo::Point<f64>.
pub(crate) fn shape_to_point(layer: &Path, index: usize, shape: shp::Shape) -> Result<Point<f64>, TagError> {
    match &shape {
        shp::Shape::Point(pt) => Ok(Point::new(pt.x, pt.y)),
        shp::Shape::PointZ(pt) => Ok(Point::new(pt.x, pt.y)),
        shp::Shape::PointM(pt) => Ok(Point::new(pt.x, pt.y)),
        _ => Err(unexpected_shape(layer, index, "Point", &shape)),
    }
}

/// Convert geo::MultiPolygon<f64> to shapefile::Polygon (outer rings CW, holes CCW).
pub(crate) fn multipolygon_to_shp(mp: &MultiPolygon<f64>) -> shp::Polygon {
    fn ring(mut line: LineString<f64>, clockwise: bool) -> Vec<shp::Point> {
        line.close();
        if clockwise { line.make_cw_winding() } else { line.make_ccw_winding() }
        line.points().map(|pt| shp::Point::new(pt.x(), pt.y())).collect()
    }

    let rings = mp.0.iter()
        .flat_map(|poly| {
            std::iter::once(shp::PolygonRing::Outer(ring(poly.exterior().clone(), true)))
                .chain(poly.interiors().iter().map(|hole| shp::PolygonRing::Inner(ring(hole.clone(), false))))
        })
        .collect::<Vec<_>>();

    shp::Polygon::with_rings(rings)
}

/// Convert geo::MultiLineString<f64> to shapefile::Polyline.
/// Parts with fewer than two points are dropped; `None` if no part is left.
pub(crate) fn multilinestring_to_shp(mls: &MultiLineString<f64>) -> Option<shp::Polyline> {
    let parts = mls.0.iter()
        .filter(|line| line.0.len() >= 2)
        .map(|line| line.points().map(|pt| shp::Point::new(pt.x(), pt.y())).collect())
        .collect::<Vec<Vec<_>>>();
    (!parts.is_empty()).then(|| shp::Polyline::with_parts(parts))
}
