//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::{fs, path::{Path, PathBuf}};

use shapefile::{
    dbase::{FieldName, FieldValue, Record, TableWriterBuilder},
    record::EsriShape,
    Point, Polygon, PolygonRing, Polyline, Writer,
};

/// Clockwise square ring from `(x0, y0)` to `(x1, y1)`.
pub fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::new(PolygonRing::Outer(vec![
        Point::new(x0, y0),
        Point::new(x0, y1),
        Point::new(x1, y1),
        Point::new(x1, y0),
        Point::new(x0, y0),
    ]))
}

pub fn segment(x0: f64, y0: f64, x1: f64, y1: f64) -> Polyline {
    Polyline::new(vec![Point::new(x0, y0), Point::new(x1, y1)])
}

fn table(fields: &[&str]) -> TableWriterBuilder {
    fields.iter().fold(TableWriterBuilder::new(), |builder, name| {
        builder.add_numeric_field(FieldName::try_from(*name).unwrap(), 18, 6)
    })
}

fn record(fields: &[&str], values: &[Option<f64>]) -> Record {
    let mut record = Record::default();
    for (name, value) in fields.iter().zip(values) {
        record.insert(name.to_string(), FieldValue::Numeric(*value));
    }
    record
}

/// Write a shapefile whose attributes are all numeric.
pub fn write_layer<S: EsriShape>(path: &Path, fields: &[&str], rows: Vec<(S, Vec<Option<f64>>)>) {
    let mut writer = Writer::from_path(path, table(fields)).unwrap();
    for (shape, values) in rows {
        writer.write_shape_and_record(&shape, &record(fields, &values)).unwrap();
    }
}

/// Write a standalone dBASE table with numeric fields.
pub fn write_dbf(path: &Path, fields: &[&str], rows: Vec<Vec<Option<f64>>>) {
    let mut writer = table(fields).build_with_file_dest(path).unwrap();
    let records = rows.iter().map(|values| record(fields, values)).collect::<Vec<_>>();
    writer.write_records(&records).unwrap();
}

pub fn write_prj(shp: &Path, wkt: &str) {
    fs::write(shp.with_extension("prj"), wkt).unwrap();
}

pub fn write_config(dir: &Path, toml: &str) -> PathBuf {
    let path = dir.join("run.toml");
    fs::write(&path, toml).unwrap();
    path
}

/// A parsed CSV: header and rows of raw cells.
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn read(path: &Path) -> Self {
        let text = fs::read_to_string(path).unwrap();
        let mut lines = text.lines().map(|line| line.split(',').map(str::to_string).collect::<Vec<_>>());
        let header = lines.next().unwrap();
        Self { header, rows: lines.collect() }
    }

    pub fn column(&self, name: &str) -> Vec<&str> {
        let i = self.header.iter().position(|h| h == name).unwrap();
        self.rows.iter().map(|row| row[i].as_str()).collect()
    }

    pub fn numbers(&self, name: &str) -> Vec<f64> {
        self.column(name).iter().map(|cell| cell.parse().unwrap()).collect()
    }

    pub fn ints(&self, name: &str) -> Vec<i64> {
        self.column(name).iter().map(|cell| cell.parse().unwrap()).collect()
    }
}
