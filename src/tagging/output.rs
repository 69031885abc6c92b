use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use polars::prelude::{Column, DataFrame};
use shapefile as shp;

use crate::{common, network::{Link, Node}, tagging::Assignment};

/// A zone id column: its name and one assignment per feature.
pub(crate) type ZoneColumn<'a> = (&'static str, &'a [Assignment]);

fn zone_column((name, assignments): ZoneColumn) -> Column {
    Column::new(name.into(), assignments.iter().map(|a| a.zone.0).collect::<Vec<_>>())
}

/// Link table: `A, B, LINKID`, then `DISTANCE` (miles) if `measures`, the zone
/// columns, and the midpoint `X_MID, Y_MID` if `measures`.
pub(crate) fn link_frame(links: &[Link], zones: &[ZoneColumn], measures: bool) -> Result<DataFrame> {
    let mut columns = vec![
        Column::new("A".into(), links.iter().map(|l| l.a).collect::<Vec<_>>()),
        Column::new("B".into(), links.iter().map(|l| l.b).collect::<Vec<_>>()),
        Column::new("LINKID".into(), links.iter().map(|l| l.id.clone()).collect::<Vec<_>>()),
    ];
    if measures {
        columns.push(Column::new("DISTANCE".into(), links.iter().map(Link::distance_miles).collect::<Vec<_>>()));
    }
    columns.extend(zones.iter().copied().map(zone_column));
    if measures {
        columns.push(Column::new("X_MID".into(), links.iter().map(|l| l.midpoint().map(|p| p.x())).collect::<Vec<_>>()));
        columns.push(Column::new("Y_MID".into(), links.iter().map(|l| l.midpoint().map(|p| p.y())).collect::<Vec<_>>()));
    }
    DataFrame::new(columns).context("[tagging::output] Failed to build link table")
}

/// Node table: `N, X, Y`, then the zone columns.
pub(crate) fn node_frame(nodes: &[Node], zones: &[ZoneColumn]) -> Result<DataFrame> {
    let mut columns = vec![
        Column::new("N".into(), nodes.iter().map(|n| n.id).collect::<Vec<_>>()),
        Column::new("X".into(), nodes.iter().map(|n| n.geometry.x()).collect::<Vec<_>>()),
        Column::new("Y".into(), nodes.iter().map(|n| n.geometry.y()).collect::<Vec<_>>()),
    ];
    columns.extend(zones.iter().copied().map(zone_column));
    DataFrame::new(columns).context("[tagging::output] Failed to build node table")
}

/// Write `<dir>/<stem>.csv`, returning the paths written.
/// With `geometry`, also writes `<dir>/<stem>.shp` carrying the same attributes.
pub(crate) fn write_link_table(dir: &Path, stem: &str, df: &mut DataFrame, links: &[Link], geometry: bool) -> Result<Vec<PathBuf>> {
    let mut written = vec![dir.join(format!("{stem}.csv"))];
    common::write_csv(df, &written[0])?;
    if geometry {
        let shapes = links.iter()
            .map(|link| common::multilinestring_to_shp(&link.geometry)
                .ok_or_else(|| anyhow!("[tagging::output] Link {} has no drawable geometry", link.id)))
            .collect::<Result<Vec<_>>>()?;
        let path = dir.join(format!("{stem}.shp"));
        common::write_shapefile(&path, df, &shapes)?;
        written.push(path);
    }
    Ok(written)
}

/// Node counterpart of [`write_link_table`].
pub(crate) fn write_node_table(dir: &Path, stem: &str, df: &mut DataFrame, nodes: &[Node], geometry: bool) -> Result<Vec<PathBuf>> {
    let mut written = vec![dir.join(format!("{stem}.csv"))];
    common::write_csv(df, &written[0])?;
    if geometry {
        let shapes = nodes.iter()
            .map(|node| shp::Point::new(node.geometry.x(), node.geometry.y()))
            .collect::<Vec<_>>();
        let path = dir.join(format!("{stem}.shp"));
        common::write_shapefile(&path, df, &shapes)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use geo::{MultiLineString, line_string, point};
    use polars::prelude::AnyValue;

    use super::*;
    use crate::{geom::ZoneId, tagging::Source};

    #[test]
    fn link_columns_by_mode() {
        let links = [Link::new(1, 2, MultiLineString(vec![line_string![(x: 0.0, y: 0.0), (x: 3218.68, y: 0.0)]]))];
        let taz = [Assignment::new(ZoneId(9), Source::Contained)];
        let hot = [Assignment::new(ZoneId::NONE, Source::Unmatched)];

        let df = link_frame(&links, &[("TAZID", &taz)], true).unwrap();
        assert_eq!(df.get_column_names_str(), ["A", "B", "LINKID", "DISTANCE", "TAZID", "X_MID", "Y_MID"]);
        assert_eq!(df.column("DISTANCE").unwrap().get(0).unwrap(), AnyValue::Float64(2.0));

        let df = link_frame(&links, &[("HOT_ZONEID", &hot)], false).unwrap();
        assert_eq!(df.get_column_names_str(), ["A", "B", "LINKID", "HOT_ZONEID"]);

        let df = link_frame(&links, &[("TAZID", &taz), ("HOT_ZONEID", &hot)], true).unwrap();
        assert_eq!(df.get_column_names_str(), ["A", "B", "LINKID", "DISTANCE", "TAZID", "HOT_ZONEID", "X_MID", "Y_MID"]);
    }

    #[test]
    fn node_table_and_shapefile_are_written() {
        let tmp = tempfile::tempdir().unwrap();
        let nodes = [Node::new(5, point!(x: 1.0, y: 2.0)), Node::new(3601, point!(x: 4.0, y: 8.0))];
        let taz = [
            Assignment::new(ZoneId(5), Source::Reserved),
            Assignment::new(ZoneId::UNRESOLVED, Source::Unresolved),
        ];

        let mut df = node_frame(&nodes, &[("TAZID", &taz)]).unwrap();
        let written = write_node_table(tmp.path(), "C1_Node_TAZID", &mut df, &nodes, true).unwrap();

        assert_eq!(written.len(), 2);
        let csv = std::fs::read_to_string(&written[0]).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "N,X,Y,TAZID");
        assert_eq!(lines[2], "3601,4.0,8.0,-1");
        assert_eq!(common::read_shapefile(&written[1]).unwrap().len(), 2);
    }
}
