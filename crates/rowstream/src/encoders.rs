//! Ready-made encoders.

use serde::Serialize;

use crate::traits::encoder::Encoder;

/// Encodes records as JSON objects with `serde_json`.
///
/// [`JsonEncoder::lines`] terminates every record with `\n`, producing
/// line-delimited JSON; [`JsonEncoder::compact`] writes the objects back to
/// back, which streaming JSON decoders also accept.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    newline: bool,
}

impl JsonEncoder {
    /// One JSON object per line.
    #[must_use]
    pub const fn lines() -> Self {
        Self { newline: true }
    }

    /// JSON objects without separators.
    #[must_use]
    pub const fn compact() -> Self {
        Self { newline: false }
    }
}

impl<R: Serialize> Encoder<R> for JsonEncoder {
    type Error = serde_json::Error;

    fn encode(&mut self, record: &R) -> Result<Vec<u8>, Self::Error> {
        let mut buf = serde_json::to_vec(record)?;
        if self.newline {
            buf.push(b'\n');
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Serialize)]
    struct Row {
        a: &'static str,
        b: i32,
    }

    #[test]
    fn test_lines() {
        let out = JsonEncoder::lines().encode(&Row { a: "x", b: 1 }).unwrap();
        assert_eq!(out, b"{\"a\":\"x\",\"b\":1}\n");
    }

    #[test]
    fn test_compact() {
        let out = JsonEncoder::compact().encode(&Row { a: "x", b: 1 }).unwrap();
        assert_eq!(out, b"{\"a\":\"x\",\"b\":1}");
    }

    #[test]
    fn test_serialize_error_is_returned() {
        // JSON object keys must be strings.
        let mut map = BTreeMap::new();
        map.insert(vec![1_u8], 1);
        assert!(JsonEncoder::lines().encode(&map).is_err());
    }
}
