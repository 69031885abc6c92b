//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::CsvWriter};

/// Write a DataFrame to a CSV file with a header row.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("[io::csv] Failed to write CSV to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    #[test]
    fn writes_header_and_rows_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        let mut df = DataFrame::new(vec![
            Column::new("LINKID".into(), vec!["1_2", "2_3"]),
            Column::new("TAZID".into(), vec![7i64, -1]),
        ]).unwrap();

        write_csv(&mut df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines, vec!["LINKID,TAZID", "1_2,7", "2_3,-1"]);
    }

    #[test]
    fn missing_directory_is_reported_with_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope").join("out.csv");
        let mut df = DataFrame::new(vec![Column::new("N".into(), vec![1i64])]).unwrap();
        let err = write_csv(&mut df, &path).unwrap_err();
        assert!(format!("{err:#}").contains("out.csv"));
    }
}
