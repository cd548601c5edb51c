//! Row binding and the streaming loop.
//!
//! - [`binder`] - binds a scanned row into a record
//! - [`writer`] - write-until-complete over `std::io::Write`
//! - [`stream`](mod@stream) - the scan, bind, encode, write loop

pub mod binder;
pub mod stream;
pub mod writer;

pub use binder::RowBinder;
pub use stream::{StreamSummary, stream, stream_with_config};
pub use writer::write_until_complete;
