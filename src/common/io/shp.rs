//! Shapefile reading and writing operations.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail, ensure};
use polars::prelude::{AnyValue, DataFrame, DataType};
use shapefile::{
    dbase::{FieldName, FieldValue, Record, TableWriterBuilder},
    record::EsriShape,
    Reader, Shape, Writer,
};

use crate::common::require_file_exists;

/// Reads all shapes + attribute records from a given `.shp` file path.
pub(crate) fn read_shapefile(path: &Path) -> Result<Vec<(Shape, Record)>> {
    require_file_exists(path)?;
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shapefile] Failed to open shapefile: {}", path.display()))?;

    let mut items = Vec::with_capacity(reader.shape_count()?);
    for (index, result) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = result
            .with_context(|| format!("[io::shapefile] Error reading record {index} of {}", path.display()))?;
        items.push((shape, record));
    }
    Ok(items)
}

/// Write `shapes` with the rows of `df` as their attribute table.
/// Integer columns become N(18,0), float columns N(19,6), string columns C(n).
pub(crate) fn write_shapefile<S: EsriShape>(path: &Path, df: &DataFrame, shapes: &[S]) -> Result<()> {
    ensure!(df.height() == shapes.len(),
        "[io::shapefile] {} attribute rows for {} shapes in {}", df.height(), shapes.len(), path.display());

    let mut builder = TableWriterBuilder::new();
    for column in df.get_columns() {
        let name = FieldName::try_from(column.name().as_str())
            .map_err(|e| anyhow!("[io::shapefile] Invalid dBASE field name {}: {:?}", column.name(), e))?;
        builder = match column.dtype() {
            DataType::String => {
                let width = column.str()?.into_iter()
                    .flatten()
                    .map(str::len)
                    .max()
                    .unwrap_or(1)
                    .clamp(1, 254);
                builder.add_character_field(name, width as u8)
            }
            DataType::Float32 | DataType::Float64 => builder.add_numeric_field(name, 19, 6),
            dtype if dtype.is_integer() => builder.add_numeric_field(name, 18, 0),
            dtype => bail!("[io::shapefile] Column {} has unsupported type {dtype}", column.name()),
        };
    }

    let mut writer = Writer::from_path(path, builder)
        .with_context(|| format!("[io::shapefile] Failed to create shapefile: {}", path.display()))?;

    for (row, shape) in shapes.iter().enumerate() {
        let mut record = Record::default();
        for column in df.get_columns() {
            let value = match (column.dtype(), column.get(row)?) {
                (DataType::String, AnyValue::String(s)) => FieldValue::Character(Some(s.to_string())),
                (DataType::String, _) => FieldValue::Character(None),
                (_, value) => FieldValue::Numeric(value.extract::<f64>()),
            };
            record.insert(column.name().to_string(), value);
        }
        writer.write_shape_and_record(shape, &record)
            .with_context(|| format!("[io::shapefile] Failed to write record {row} to {}", path.display()))?;
    }

    Ok(())
}
