pub mod tag;
pub mod walk;
