//! Record encoders.

use crate::error::BoxError;

/// Turns a bound record into bytes.
///
/// Encoders may run arbitrary hydration logic before serializing. Any
/// closure `FnMut(&R) -> Result<Vec<u8>, E>` is an encoder.
///
/// # Example
///
/// ```rust,ignore
/// let enc = |user: &User| -> Result<Vec<u8>, serde_json::Error> {
///     let mut out = serde_json::to_vec(&user.with_avatar_url())?;
///     out.push(b'\n');
///     Ok(out)
/// };
/// ```
pub trait Encoder<R> {
    /// Error returned when a record cannot be encoded.
    type Error: Into<BoxError>;

    /// Encode one record.
    ///
    /// # Errors
    ///
    /// Any error aborts the stream.
    fn encode(&mut self, record: &R) -> Result<Vec<u8>, Self::Error>;
}

impl<R, F, E> Encoder<R> for F
where
    F: FnMut(&R) -> Result<Vec<u8>, E>,
    E: Into<BoxError>,
{
    type Error = E;

    fn encode(&mut self, record: &R) -> Result<Vec<u8>, Self::Error> {
        self(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_with<R, E: Encoder<R>>(mut enc: E, record: &R) -> Result<Vec<u8>, E::Error> {
        enc.encode(record)
    }

    #[test]
    fn test_closure_is_encoder() {
        let out = encode_with(
            |n: &u32| -> Result<Vec<u8>, std::fmt::Error> { Ok(n.to_string().into_bytes()) },
            &42,
        )
        .unwrap();
        assert_eq!(out, b"42");
    }

    #[test]
    fn test_closure_state_persists() {
        let mut seen = 0;
        let mut enc = |_: &u32| -> Result<Vec<u8>, std::fmt::Error> {
            seen += 1;
            Ok(Vec::new())
        };
        enc.encode(&1).unwrap();
        enc.encode(&2).unwrap();
        drop(enc);
        assert_eq!(seen, 2);
    }
}
