//! Write-until-complete.

use std::io::{self, Write};

/// Write all of `buf` to `sink`, tolerating short writes.
///
/// Calls [`Write::write`] repeatedly, starting at the first unwritten byte,
/// until every byte has been accepted. Unlike [`Write::write_all`], no error
/// is retried, not even [`io::ErrorKind::Interrupted`]. A sink that accepts
/// zero bytes while data remains fails with [`io::ErrorKind::WriteZero`].
///
/// Returns the number of bytes written, which equals `buf.len()`.
///
/// # Errors
///
/// Returns the first error reported by the sink. Bytes accepted before the
/// error stay written.
pub fn write_until_complete<W: Write + ?Sized>(sink: &mut W, buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        let n = sink.write(&buf[written..])?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("sink accepted 0 bytes with {} remaining", buf.len() - written),
            ));
        }
        written += n;
    }
    Ok(written)
}
