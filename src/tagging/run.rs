use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    common,
    config::{LinkOrder, RunConfig, TagMode},
    error::TagError,
    geom::ZoneLayer,
    network,
    tagging::{
        ReservedZones, TagSummary, ZoneTag, tag_links, tag_nodes,
        output::{self, ZoneColumn},
    },
};

/// Result of a tagging run.
#[derive(Debug, Clone, Default)]
pub struct TagReport {
    /// Per zone column, the link and node summaries.
    pub summaries: Vec<(&'static str, TagSummary, TagSummary)>,
    /// Files written, in order.
    pub outputs: Vec<PathBuf>,
}

impl TagReport {
    /// Features left with the unresolved sentinel, links and nodes together.
    pub fn unresolved(&self) -> usize {
        self.summaries.iter().map(|(_, links, nodes)| links.unresolved + nodes.unresolved).sum()
    }
}

/// Output file stems (links, nodes) for a tag mode.
pub fn output_stems(mode: TagMode) -> (&'static str, &'static str) {
    match mode {
        TagMode::Taz => ("C1_Link_TAZID", "C1_Node_TAZID"),
        TagMode::Toll => ("C1_Link_HOT", "C1_Node_HOT"),
        TagMode::Both => ("C1_Link_TAZID_HOT", "C1_Node_TAZID_HOT"),
    }
}

fn required<'a>(path: &'a Option<PathBuf>, key: &str) -> Result<&'a Path, TagError> {
    path.as_deref().ok_or_else(|| TagError::InvalidConfig(format!("layers.{key} is not set")))
}

/// Check that every input layer of the run shares one coordinate system.
fn check_crs(paths: &[&Path]) -> Result<()> {
    let layers = paths.iter()
        .map(|&path| Ok((path.to_path_buf(), common::crs_from_shapefile(path)?)))
        .collect::<Result<Vec<_>>>()?;
    common::ensure_same_crs(&layers)?;
    Ok(())
}

/// Tag the highway network with the zone systems selected by `config.mode`
/// and write one link table and one node table to `config.output_dir`.
pub fn run_tagging(config: &RunConfig) -> Result<TagReport> {
    config.validate_for_tagging()?;
    let used_zones = config.used_zones
        .ok_or_else(|| TagError::InvalidConfig("used_zones is required for tagging".into()))?;
    let reserved = ReservedZones::new(used_zones);
    let fields = &config.fields;
    let mode = config.mode;

    let links_path = required(&config.layers.links, "links")?;
    let nodes_path = required(&config.layers.nodes, "nodes")?;
    let taz_path = mode.tags_taz().then(|| required(&config.layers.taz, "taz")).transpose()?;
    let toll_path = mode.tags_toll().then(|| required(&config.layers.toll_zones, "toll_zones")).transpose()?;
    let hot_path = config.layers.hot_links.as_deref().filter(|_| mode.tags_toll());

    let mut inputs = vec![links_path, nodes_path];
    inputs.extend(taz_path.into_iter().chain(toll_path).chain(hot_path));
    check_crs(&inputs)?;

    info!("[tagging] Loading network from {} and {}", links_path.display(), nodes_path.display());
    let mut links = network::read_links(links_path, fields, false)?;
    let nodes = network::read_nodes(nodes_path, fields)?;
    if config.link_order == LinkOrder::LinkId {
        links.sort_by_key(|link| (link.a, link.b));
    }

    let taz = taz_path
        .map(|path| ZoneLayer::from_shapefile(path, &fields.taz_id))
        .transpose()?;
    let toll = toll_path
        .map(|path| ZoneLayer::from_shapefile(path, &fields.toll_zone_id))
        .transpose()?;
    let hot_links = hot_path
        .map(|path| network::read_link_ids(path, fields))
        .transpose()?;

    let mut tags = Vec::new();
    if let Some(layer) = &taz {
        info!("[tagging] {} TAZ polygons", layer.len());
        tags.push(ZoneTag::taz(layer, config.search_radius));
    }
    if let Some(layer) = &toll {
        info!("[tagging] {} toll zone polygons", layer.len());
        let tag = ZoneTag::toll(layer);
        tags.push(match &hot_links {
            Some(ids) => tag.with_eligible_links(ids),
            None => tag,
        });
    }

    let link_zones = tags.iter().map(|tag| tag_links(tag, &reserved, &links)).collect::<Vec<_>>();
    let node_zones = tags.iter().map(|tag| tag_nodes(tag, &reserved, &nodes)).collect::<Vec<_>>();

    let link_columns = tags.iter().zip(&link_zones)
        .map(|(tag, zones)| (tag.column, zones.as_slice()))
        .collect::<Vec<ZoneColumn>>();
    let node_columns = tags.iter().zip(&node_zones)
        .map(|(tag, zones)| (tag.column, zones.as_slice()))
        .collect::<Vec<ZoneColumn>>();

    let dir = config.output_dir.as_path();
    common::ensure_dir_exists(dir)?;
    let (link_stem, node_stem) = output_stems(mode);

    let mut link_df = output::link_frame(&links, &link_columns, mode.tags_taz())?;
    let mut node_df = output::node_frame(&nodes, &node_columns)?;
    let mut outputs = output::write_link_table(dir, link_stem, &mut link_df, &links, config.write_geometry)
        .with_context(|| format!("[tagging] Failed to write link table to {}", dir.display()))?;
    outputs.extend(output::write_node_table(dir, node_stem, &mut node_df, &nodes, config.write_geometry)
        .with_context(|| format!("[tagging] Failed to write node table to {}", dir.display()))?);

    let summaries = tags.iter().zip(link_zones.iter().zip(&node_zones))
        .map(|(tag, (l, n))| (tag.column, TagSummary::from_assignments(l), TagSummary::from_assignments(n)))
        .collect::<Vec<_>>();

    let report = TagReport { summaries, outputs };
    info!("[tagging] Wrote {} files to {} ({} unresolved)", report.outputs.len(), dir.display(), report.unresolved());
    Ok(report)
}
