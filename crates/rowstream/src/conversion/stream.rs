//! The scan → bind → encode → write loop.

use std::any::type_name;
use std::io::Write;

use super::writer::write_until_complete;
use crate::config::StreamConfig;
use crate::schema::mapping::FieldMap;
use crate::traits::cursor::Cursor;
use crate::traits::encoder::Encoder;
use crate::traits::record::Record;
use crate::types::Value;
use crate::{Result, StreamError};

/// Totals for a completed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Rows read from the cursor and written to the sink.
    pub rows: u64,
    /// Encoded bytes written to the sink.
    pub bytes: u64,
}

/// Stream every row of `cursor` into `sink`.
///
/// Each row is bound into a fresh `R::default()` using the `db` annotations
/// of `R`, passed to `encoder`, and the encoded bytes are written to `sink`
/// in full before the next row is read. On success `destination` holds the
/// last row bound (it is left untouched when there are no rows).
///
/// Returns `Ok(())` only once the cursor is exhausted; the first error of any
/// step aborts the stream.
///
/// # Example
///
/// ```rust,ignore
/// use rowstream::{stream, JsonEncoder};
///
/// let mut out: Vec<u8> = Vec::new();
/// stream(&mut rows, &mut User::default(), JsonEncoder::lines(), &mut out)?;
/// ```
///
/// # Errors
///
/// See [`StreamError`]. After a write error the sink may hold part of the
/// failing record.
pub fn stream<C, R, E, W>(cursor: C, destination: &mut R, encoder: E, sink: &mut W) -> Result<()>
where
    C: Cursor,
    R: Record,
    E: Encoder<R>,
    W: Write + ?Sized,
{
    stream_with_config(cursor, destination, encoder, sink, &StreamConfig::default()).map(|_| ())
}

/// [`stream`] with explicit configuration, returning row and byte totals.
///
/// # Errors
///
/// See [`stream`].
pub fn stream_with_config<C, R, E, W>(
    mut cursor: C,
    destination: &mut R,
    mut encoder: E,
    sink: &mut W,
    config: &StreamConfig,
) -> Result<StreamSummary>
where
    C: Cursor,
    R: Record,
    E: Encoder<R>,
    W: Write + ?Sized,
{
    let map = FieldMap::<R>::build(config)?;
    let columns = cursor.column_names().map_err(StreamError::columns)?;
    let binder = map.resolve(&columns)?;

    let span = tracing::debug_span!(
        "rowstream.stream",
        record = type_name::<R>(),
        columns = columns.len(),
    );
    let _enter = span.enter();

    let mut summary = StreamSummary::default();
    while cursor.advance() {
        let row_index = summary.rows;

        let mut slots = vec![Value::Null; binder.width()];
        cursor
            .scan_into(&mut slots)
            .map_err(|e| StreamError::scan(row_index, e))?;

        let record = binder.bind(slots, row_index)?;

        let buf = encoder
            .encode(&record)
            .map_err(|e| StreamError::encode(row_index, e))?;

        let n = write_until_complete(&mut *sink, &buf)
            .map_err(|e| StreamError::write(row_index, e))?;

        *destination = record;
        summary.rows += 1;
        summary.bytes += n as u64;
        tracing::trace!(row = row_index, bytes = n, "row written");

        if let Some(every) = config.progress()
            && summary.rows % every.get() == 0
        {
            tracing::debug!(rows = summary.rows, bytes = summary.bytes, "stream progress");
        }
    }

    tracing::debug!(rows = summary.rows, bytes = summary.bytes, "stream complete");
    Ok(summary)
}
