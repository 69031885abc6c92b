use geo::{Euclidean, InterpolatableLine, Length, MultiLineString, Point};

/// Planar length of all parts of a line.
pub(crate) fn line_length(line: &MultiLineString<f64>) -> f64 {
    line.0.iter().map(|part| Euclidean.length(part)).sum()
}

/// The point halfway along `line`, measured part after part (gaps between
/// parts do not count). Returns `None` for a line without coordinates.
pub(crate) fn midpoint(line: &MultiLineString<f64>) -> Option<Point<f64>> {
    let total = line_length(line);
    if total == 0.0 {
        return line.0.iter().find_map(|part| part.0.first()).map(|c| Point::from(*c));
    }

    let mut remaining = total * 0.5;
    for part in &line.0 {
        let length = Euclidean.length(part);
        if length > 0.0 && remaining <= length {
            return part.point_at_ratio_from_start(&Euclidean, remaining / length);
        }
        remaining -= length;
    }

    // rounding left us past the end
    line.0.iter().rev().find_map(|part| part.0.last()).map(|c| Point::from(*c))
}
