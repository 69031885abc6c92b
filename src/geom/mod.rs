mod bbox;
mod line;
mod resolve;
mod zone_id;
mod zones;

pub(crate) use bbox::BoundingBox;
pub(crate) use line::{line_length, midpoint};
pub use resolve::Resolution;
pub use zone_id::ZoneId;
pub use zones::ZoneLayer;
pub(crate) use zones::read_zone_features;
