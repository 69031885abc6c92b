//! Standalone dBASE table reading (attribute-only layers such as transit line exports).

use std::path::Path;

use anyhow::{Context, Result};
use shapefile::dbase::{self, Record};

use crate::common::require_file_exists;

/// Reads every record of the `.dbf` table at `path`.
pub(crate) fn read_dbf(path: &Path) -> Result<Vec<Record>> {
    require_file_exists(path)?;
    let mut reader = dbase::Reader::from_path(path)
        .with_context(|| format!("[io::dbf] Failed to open dBASE table: {}", path.display()))?;
    reader.read()
        .with_context(|| format!("[io::dbf] Failed to read records from {}", path.display()))
}
