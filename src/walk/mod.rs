//! Share of each TAZ within walking distance of local bus service.

mod coverage;
mod transit;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geo::{Area, MultiPolygon};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info};

use crate::{
    common,
    config::RunConfig,
    error::TagError,
    geom::{ZoneId, read_zone_features},
    network,
};
use coverage::Coverage;

/// Output table name, without extension.
pub const WALK_BUFFER_STEM: &str = "Walk_Buffer_TAZ";

/// Walkable area of one TAZ. Areas are in squared layer units, shares in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkShare {
    pub taz: ZoneId,
    pub taz_area: f64,
    pub local_area: f64,
    pub stops_area: f64,
    pub local_pct: f64,
    pub stops_pct: f64,
    pub walk_pct: f64,
}

#[inline]
fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

impl WalkShare {
    /// Measure `zone` against both coverages. A positive `walk100` replaces
    /// the computed walk share.
    fn measure(taz: ZoneId, zone: &MultiPolygon<f64>, walk100: Option<f64>, lines: &Coverage, stops: &Coverage) -> Self {
        let taz_area = zone.unsigned_area();
        let local_area = lines.area_within(zone);
        let stops_area = stops.area_within(zone);
        let local_pct = percent(local_area, taz_area);
        let stops_pct = percent(stops_area, taz_area);
        let walk_pct = match walk100 {
            Some(value) if value > 0.0 => value,
            _ => local_pct.max(stops_pct),
        };
        Self { taz, taz_area, local_area, stops_area, local_pct, stops_pct, walk_pct }
    }
}

fn share_frame(shares: &[WalkShare]) -> Result<DataFrame> {
    let column = |name: &str, f: fn(&WalkShare) -> f64| {
        Column::new(name.into(), shares.iter().map(f).collect::<Vec<_>>())
    };
    DataFrame::new(vec![
        Column::new("TAZID".into(), shares.iter().map(|s| s.taz.0).collect::<Vec<_>>()),
        column("TAZAREA", |s| s.taz_area),
        column("LOCALAREA", |s| s.local_area),
        column("STOPSAREA", |s| s.stops_area),
        column("LOCALPCT", |s| s.local_pct),
        column("STOPSPCT", |s| s.stops_pct),
        column("WALKPCT", |s| s.walk_pct),
    ]).context("[walk] Failed to build walk buffer table")
}

/// Result of a walk-buffer run.
#[derive(Debug, Clone)]
pub struct WalkReport {
    pub shares: Vec<WalkShare>,
    pub outputs: Vec<PathBuf>,
}

fn required<'a>(path: &'a Option<PathBuf>, key: &str) -> Result<&'a Path, TagError> {
    path.as_deref().ok_or_else(|| TagError::InvalidConfig(format!("layers.{key} is not set")))
}

/// Compute the walk share of every TAZ and write `Walk_Buffer_TAZ.csv`
/// (plus a TAZ shapefile when `write_geometry` is set).
pub fn run_walk_buffer(config: &RunConfig) -> Result<WalkReport> {
    config.validate_for_walk()?;
    let fields = &config.fields;
    let walk = &config.walk;

    let taz_path = required(&config.layers.taz, "taz")?;
    let links_path = required(&config.layers.links, "links")?;
    let nodes_path = required(&config.layers.nodes, "nodes")?;
    let transit_path = required(&config.layers.transit_links, "transit_links")?;

    let layers = [taz_path, links_path, nodes_path].into_iter()
        .map(|path| Ok((path.to_path_buf(), common::crs_from_shapefile(path)?)))
        .collect::<Result<Vec<_>>>()?;
    common::ensure_same_crs(&layers)?;

    let zones = read_zone_features(taz_path, &fields.taz_id)?;
    network::ensure_unique_ids(taz_path, "zone", zones.iter().map(|zone| zone.id.0))?;
    let links = network::read_links(links_path, fields, true)?;
    let nodes = network::read_nodes(nodes_path, fields)?;
    let segments = transit::read_transit(transit_path, fields)?;

    let bus_lines = transit::bus_line_links(&segments, &links, walk);
    let stop_ids = transit::stop_nodes(&segments, walk);
    info!("[walk] {} local bus links, {} stops", bus_lines.len(), stop_ids.len());

    let lines = Coverage::around_lines(bus_lines.iter().map(|link| &link.geometry), walk.distance);
    let stops = Coverage::around_points(
        nodes.iter().filter(|node| stop_ids.contains(&node.id)).map(|node| node.geometry),
        walk.distance,
    );
    debug!("[walk] Line coverage {:.0}, stop coverage {:.0}", lines.area(), stops.area());

    let shares = zones.iter()
        .map(|zone| {
            let walk100 = common::optional_numeric_field(&zone.record, &fields.walk100);
            WalkShare::measure(zone.id, &zone.shape, walk100, &lines, &stops)
        })
        .collect::<Vec<_>>();

    let dir = config.output_dir.as_path();
    common::ensure_dir_exists(dir)?;
    let mut df = share_frame(&shares)?;
    let mut outputs = vec![dir.join(format!("{WALK_BUFFER_STEM}.csv"))];
    common::write_csv(&mut df, &outputs[0])?;
    if config.write_geometry {
        let path = dir.join(format!("{WALK_BUFFER_STEM}.shp"));
        let shapes = zones.iter().map(|zone| common::multipolygon_to_shp(&zone.shape)).collect::<Vec<_>>();
        common::write_shapefile(&path, &df, &shapes)?;
        outputs.push(path);
    }

    info!("[walk] Wrote walk shares for {} TAZs to {}", shares.len(), dir.display());
    Ok(WalkReport { shares, outputs })
}
