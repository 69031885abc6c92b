mod csv;
mod dbf;
mod record;
mod shp;

pub(crate) use csv::*;
pub(crate) use dbf::*;
pub(crate) use record::*;
pub(crate) use shp::*;
