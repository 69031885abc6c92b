use std::{fmt, fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use tracing::warn;

use crate::error::TagError;

/// Coordinate reference system of a layer, as declared by its `.prj` sidecar (ESRI WKT).
#[derive(Debug, Clone)]
pub(crate) struct Crs {
    wkt: String, // whitespace-stripped, upper-cased WKT used for comparison
    name: String,
}

impl Crs {
    /// Parse a WKT definition. Returns `None` for empty text.
    pub fn from_wkt(wkt: &str) -> Option<Self> {
        let normalized = wkt.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        if normalized.is_empty() { return None }

        // PROJCS["NAD_1983_UTM_Zone_12N",GEOGCS[...]] -> NAD_1983_UTM_Zone_12N
        let name = wkt.split('"').nth(1)
            .filter(|s| !s.is_empty())
            .unwrap_or("unnamed")
            .to_string();

        Some(Self { wkt: normalized, name })
    }

    /// Human-readable name of the outermost CRS node.
    #[inline] pub fn name(&self) -> &str { &self.name }
}

impl PartialEq for Crs {
    fn eq(&self, other: &Self) -> bool { self.wkt == other.wkt }
}

impl Eq for Crs {}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Read the CRS of the shapefile at `path` from its `.prj` sidecar, if present.
pub(crate) fn crs_from_shapefile(path: &Path) -> Result<Option<Crs>> {
    let prj = path.with_extension("prj");
    if !prj.exists() { return Ok(None) }
    let wkt = fs::read_to_string(&prj)
        .with_context(|| format!("[io::crs] Failed to read projection file: {}", prj.display()))?;
    Ok(Crs::from_wkt(&wkt))
}

/// Ensure every layer that declares a CRS declares the same one.
/// Layers without a `.prj` are accepted with a warning.
pub(crate) fn ensure_same_crs(layers: &[(PathBuf, Option<Crs>)]) -> Result<(), TagError> {
    let mut reference: Option<(&PathBuf, &Crs)> = None;
    for (path, crs) in layers {
        let Some(crs) = crs else {
            warn!("[crs] {} has no .prj file; assuming it matches the other layers", path.display());
            continue;
        };
        match reference {
            None => reference = Some((path, crs)),
            Some((ref_path, ref_crs)) if ref_crs != crs => {
                return Err(TagError::CrsMismatch {
                    left: ref_path.clone(),
                    left_crs: ref_crs.name().to_string(),
                    right: path.clone(),
                    right_crs: crs.name().to_string(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
