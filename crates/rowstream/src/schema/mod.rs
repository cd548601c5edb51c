//! Annotation parsing and column to field mapping.

pub mod mapping;
pub mod tag;

pub use mapping::FieldMap;
pub use tag::{Tag, TagError, Tags};
