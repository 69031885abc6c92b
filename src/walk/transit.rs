use std::path::Path;

use ahash::{AHashMap, AHashSet};
use anyhow::{Context, Result};

use crate::{common, config::{FieldNames, WalkConfig}, error::TagError, network::Link};

/// One row of the transit line table: a route segment over a highway link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TransitSegment {
    pub a: i64,
    pub b: i64,
    pub mode: i64,
    /// Stop flags at the A and B ends; blank values are `None`.
    pub stop_a: Option<f64>,
    pub stop_b: Option<f64>,
}

/// Read the transit line table (dBASE, no geometry).
pub(crate) fn read_transit(path: &Path, fields: &FieldNames) -> Result<Vec<TransitSegment>> {
    common::read_dbf(path)?
        .iter()
        .enumerate()
        .map(|(index, record)| Ok(TransitSegment {
            a: common::integer_field(path, record, index, &fields.a)?,
            b: common::integer_field(path, record, index, &fields.b)?,
            mode: common::integer_field(path, record, index, &fields.mode)?,
            stop_a: common::optional_numeric_field(record, &fields.stop_a),
            stop_b: common::optional_numeric_field(record, &fields.stop_b),
        }))
        .collect::<Result<Vec<_>, TagError>>()
        .with_context(|| format!("[walk::transit] Failed to load transit lines from {}", path.display()))
}

/// Highway links carrying local bus service below the facility-type cutoff.
/// A link served by several routes is returned once.
pub(crate) fn bus_line_links<'a>(segments: &[TransitSegment], links: &'a [Link], walk: &WalkConfig) -> Vec<&'a Link> {
    let served = segments.iter()
        .filter(|s| s.mode == walk.local_bus_mode)
        .map(|s| Link::link_id(s.a, s.b))
        .collect::<AHashSet<_>>();

    links.iter()
        .filter(|link| served.contains(&link.id))
        .filter(|link| link.facility_type.is_some_and(|ft| ft < walk.max_facility_type))
        .collect()
}

/// Node ids that are stops of a route in the stop mode range.
///
/// Per node, takes the largest STOPA over segments starting there and the
/// largest STOPB over segments ending there; either one above zero makes a stop.
pub(crate) fn stop_nodes(segments: &[TransitSegment], walk: &WalkConfig) -> AHashSet<i64> {
    let mut max_a: AHashMap<i64, f64> = AHashMap::new();
    let mut max_b: AHashMap<i64, f64> = AHashMap::new();

    let in_range = |mode: i64| walk.stop_mode_min < mode && mode <= walk.stop_mode_max;
    for segment in segments.iter().filter(|s| in_range(s.mode)) {
        if let Some(flag) = segment.stop_a {
            max_a.entry(segment.a).and_modify(|m| *m = m.max(flag)).or_insert(flag);
        }
        if let Some(flag) = segment.stop_b {
            max_b.entry(segment.b).and_modify(|m| *m = m.max(flag)).or_insert(flag);
        }
    }

    max_a.into_iter().chain(max_b)
        .filter(|&(_, flag)| flag > 0.0)
        .map(|(node, _)| node)
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{MultiLineString, line_string};

    use super::*;

    fn segment(a: i64, b: i64, mode: i64, stop_a: f64, stop_b: f64) -> TransitSegment {
        TransitSegment { a, b, mode, stop_a: Some(stop_a), stop_b: Some(stop_b) }
    }

    fn link(a: i64, b: i64, ft: f64) -> Link {
        Link::new(a, b, MultiLineString(vec![line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]]))
            .with_facility_type(Some(ft))
    }

    #[test]
    fn bus_lines_semi_join_highway_links() {
        let segments = [
            segment(1, 2, 4, 0.0, 0.0),
            segment(1, 2, 4, 0.0, 0.0), // second route on the same link
            segment(2, 3, 4, 0.0, 0.0),
            segment(3, 4, 6, 0.0, 0.0),
        ];
        let links = [link(1, 2, 3.0), link(2, 3, 12.0), link(3, 4, 3.0), link(2, 1, 3.0)];

        let lines = bus_line_links(&segments, &links, &WalkConfig::default());
        assert_eq!(lines.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["1_2"]);
    }

    #[test]
    fn stops_use_max_flag_per_end() {
        let segments = [
            segment(10, 11, 6, 0.0, 1.0),  // 11 is a stop via B
            segment(10, 12, 6, 0.0, 0.0),
            segment(13, 14, 7, 1.0, 0.0),  // 13 is a stop via A
            segment(15, 16, 4, 1.0, 1.0),  // local bus mode is not a stop mode
            segment(17, 18, 10, 1.0, 1.0), // above the range
        ];
        let mut stops = stop_nodes(&segments, &WalkConfig::default()).into_iter().collect::<Vec<_>>();
        stops.sort();
        assert_eq!(stops, [11, 13]);
    }

    #[test]
    fn blank_stop_flags_are_ignored() {
        let segments = [TransitSegment { a: 1, b: 2, mode: 5, stop_a: None, stop_b: Some(-1.0) }];
        assert!(stop_nodes(&segments, &WalkConfig::default()).is_empty());
    }
}
