//! Run configuration, loaded from a TOML file.
//!
//! Every key has a default, so a minimal file only names the input layers:
//!
//! ```toml
//! output_dir = "out"
//! used_zones = 3600
//!
//! [layers]
//! taz = "TAZ.shp"
//! toll_zones = "TollZones.shp"
//! links = "HwyLinks.shp"
//! nodes = "HwyNodes.shp"
//! ```

use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::TagError;

/// Which zone systems a tagging run assigns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMode {
    #[default]
    Taz,
    Toll,
    Both,
}

impl TagMode {
    #[inline] pub fn tags_taz(self) -> bool { matches!(self, Self::Taz | Self::Both) }
    #[inline] pub fn tags_toll(self) -> bool { matches!(self, Self::Toll | Self::Both) }
}

/// Row order of the link tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOrder {
    /// Keep the order of the link layer.
    #[default]
    Input,
    /// Sort by the `A_B` link id.
    LinkId,
}

/// Input layer paths. Relative paths resolve against the config file's directory.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Layers {
    pub taz: Option<PathBuf>,
    pub toll_zones: Option<PathBuf>,
    pub links: Option<PathBuf>,
    pub nodes: Option<PathBuf>,
    /// Links eligible for a toll zone; all others get zone 0.
    pub hot_links: Option<PathBuf>,
    /// Transit route links (dBASE table) for the walk buffer.
    pub transit_links: Option<PathBuf>,
}

/// Attribute names in the input layers.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub a: String,
    pub b: String,
    pub node: String,
    pub taz_id: String,
    pub toll_zone_id: String,
    pub facility_type: String,
    pub walk100: String,
    pub mode: String,
    pub stop_a: String,
    pub stop_b: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            a: "A".into(),
            b: "B".into(),
            node: "N".into(),
            taz_id: "TAZID".into(),
            toll_zone_id: "EL_Zone".into(),
            facility_type: "FT".into(),
            walk100: "WALK100".into(),
            mode: "MODE".into(),
            stop_a: "STOPA".into(),
            stop_b: "STOPB".into(),
        }
    }
}

/// Parameters of the walk-to-transit buffer.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Walk distance in layer units (0.4 mi in meters).
    pub distance: f64,
    /// Transit MODE code of local bus lines.
    pub local_bus_mode: i64,
    /// Stops are read from links with `stop_mode_min < MODE <= stop_mode_max`.
    pub stop_mode_min: i64,
    pub stop_mode_max: i64,
    /// Bus lines count only on highway links with FT below this value.
    pub max_facility_type: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            distance: 643.7376,
            local_bus_mode: 4,
            stop_mode_min: 4,
            stop_mode_max: 9,
            max_facility_type: 12.0,
        }
    }
}

/// Settings of one run, shared by the tagging and walk-buffer commands.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub mode: TagMode,
    /// Highest reserved zone number; node ids up to this value are zone centroids.
    pub used_zones: Option<i64>,
    /// Radius of the nearest-zone search for TAZ tagging, in layer units.
    pub search_radius: f64,
    pub link_order: LinkOrder,
    /// Also write each output table as a shapefile.
    pub write_geometry: bool,
    pub layers: Layers,
    pub fields: FieldNames,
    pub walk: WalkConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            mode: TagMode::default(),
            used_zones: None,
            search_radius: 1000.0,
            link_order: LinkOrder::default(),
            write_geometry: false,
            layers: Layers::default(),
            fields: FieldNames::default(),
            walk: WalkConfig::default(),
        }
    }
}

fn required<'a>(path: &'a Option<PathBuf>, key: &str, purpose: &str) -> Result<&'a Path, TagError> {
    path.as_deref()
        .ok_or_else(|| TagError::InvalidConfig(format!("layers.{key} is required for {purpose}")))
}

impl RunConfig {
    /// Parse a TOML config, resolving relative paths against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("[config] Failed to parse config file: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Make every relative path in the config relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| if p.is_relative() { *p = base.join(&*p) };
        rebase(&mut self.output_dir);
        let layers = &mut self.layers;
        for layer in [
            &mut layers.taz, &mut layers.toll_zones, &mut layers.links,
            &mut layers.nodes, &mut layers.hot_links, &mut layers.transit_links,
        ] {
            if let Some(p) = layer.as_mut() { rebase(p) }
        }
    }

    /// Checks shared by both commands.
    pub fn validate(&self) -> Result<(), TagError> {
        if !(self.search_radius.is_finite() && self.search_radius >= 0.0) {
            return Err(TagError::InvalidConfig(format!(
                "search_radius must be a non-negative number, got {}", self.search_radius)));
        }
        if !(self.walk.distance.is_finite() && self.walk.distance > 0.0) {
            return Err(TagError::InvalidConfig(format!(
                "walk.distance must be positive, got {}", self.walk.distance)));
        }
        if self.walk.stop_mode_min >= self.walk.stop_mode_max {
            return Err(TagError::InvalidConfig(format!(
                "walk.stop_mode_min ({}) must be below walk.stop_mode_max ({})",
                self.walk.stop_mode_min, self.walk.stop_mode_max)));
        }
        Ok(())
    }

    /// Layers and settings needed by a tagging run in `self.mode`.
    pub fn validate_for_tagging(&self) -> Result<(), TagError> {
        self.validate()?;
        let purpose = "tagging";
        required(&self.layers.links, "links", purpose)?;
        required(&self.layers.nodes, "nodes", purpose)?;
        if self.mode.tags_taz() {
            required(&self.layers.taz, "taz", "TAZ tagging")?;
        }
        if self.mode.tags_toll() {
            required(&self.layers.toll_zones, "toll_zones", "toll-zone tagging")?;
        }
        match self.used_zones {
            None => Err(TagError::InvalidConfig("used_zones is required for tagging".into())),
            Some(n) if n < 0 => Err(TagError::InvalidConfig(format!("used_zones must not be negative, got {n}"))),
            Some(_) => Ok(()),
        }
    }

    /// Layers needed by the walk-buffer computation.
    pub fn validate_for_walk(&self) -> Result<(), TagError> {
        self.validate()?;
        let purpose = "the walk buffer";
        required(&self.layers.taz, "taz", purpose)?;
        required(&self.layers.links, "links", purpose)?;
        required(&self.layers.nodes, "nodes", purpose)?;
        required(&self.layers.transit_links, "transit_links", purpose)?;
        Ok(())
    }
}
