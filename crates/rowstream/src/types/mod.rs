//! Scanned value types.
//!
//! - [`value`] - the dynamically typed [`Value`] a cursor scans into

pub mod value;

pub use value::{Mismatch, Value, ValueKind};
