mod link;
mod node;
mod read;

pub use link::{Link, METERS_PER_MILE};
pub use node::Node;
pub(crate) use read::{ensure_unique_ids, read_link_ids, read_links, read_nodes};
