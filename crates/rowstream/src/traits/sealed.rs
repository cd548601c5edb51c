//! Conversions from scanned values into field types.
//!
//! [`FromValue`] and [`FieldValue`](super::field::FieldValue) are sealed: the
//! set of types a record field may hold is fixed by this crate, so new
//! conversions or trait methods can be added in a minor release.

use crate::types::{Mismatch, Value};

pub(crate) mod private {
    /// Supertrait of [`FromValue`](super::FromValue) and `FieldValue`.
    pub trait Sealed {}
}

/// Conversion from a concrete scanned [`Value`] into a field type.
///
/// This trait is sealed - external implementations are not allowed.
/// It is implemented for every type a record field may hold; optional
/// fields use `Option<T>` where `T: FromValue` (see
/// [`FieldValue`](super::field::FieldValue)).
///
/// `from_value` never sees [`Value::Null`] from the binder: nulls are
/// resolved by the field's shape before conversion. Implementations still
/// reject it as a mismatch.
pub trait FromValue: private::Sealed + Sized {
    /// Name of the type, used in bind error messages.
    const TYPE_NAME: &'static str;

    /// Convert a scanned value to this type.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] if the value's kind is incompatible or an
    /// integer does not fit.
    fn from_value(value: Value) -> Result<Self, Mismatch>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Sealed Implementations for Integer Types
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}
            impl FromValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_value(value: Value) -> Result<Self, Mismatch> {
                    match value {
                        Value::Int(v) => {
                            Self::try_from(v).map_err(|_| Mismatch::out_of_range(Self::TYPE_NAME, v))
                        }
                        Value::UInt(v) => {
                            Self::try_from(v).map_err(|_| Mismatch::out_of_range(Self::TYPE_NAME, v))
                        }
                        other => Err(Mismatch::kind(Self::TYPE_NAME, &other)),
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

// ═══════════════════════════════════════════════════════════════════════════
// Sealed Implementations for Other Primitive Types
// ═══════════════════════════════════════════════════════════════════════════

// Floats accept any numeric value; integers are converted with `as`, which
// rounds to the nearest representable float.
macro_rules! impl_from_value_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}
            impl FromValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_precision_loss,
                    clippy::unnecessary_cast
                )]
                fn from_value(value: Value) -> Result<Self, Mismatch> {
                    match value {
                        Value::Float(v) => Ok(v as Self),
                        Value::Int(v) => Ok(v as Self),
                        Value::UInt(v) => Ok(v as Self),
                        other => Err(Mismatch::kind(Self::TYPE_NAME, &other)),
                    }
                }
            }
        )*
    };
}

impl_from_value_float!(f32, f64);

impl private::Sealed for bool {}
impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(Mismatch::kind(Self::TYPE_NAME, &other)),
        }
    }
}

impl private::Sealed for String {}
impl FromValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(Mismatch::kind(Self::TYPE_NAME, &other)),
        }
    }
}

impl private::Sealed for Vec<u8> {}
impl FromValue for Vec<u8> {
    const TYPE_NAME: &'static str = "Vec<u8>";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Bytes(b) => Ok(b),
            Value::Text(s) => Ok(s.into_bytes()),
            other => Err(Mismatch::kind(Self::TYPE_NAME, &other)),
        }
    }
}

impl private::Sealed for Vec<String> {}
impl FromValue for Vec<String> {
    const TYPE_NAME: &'static str = "Vec<String>";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::TextList(list) => Ok(list),
            other => Err(Mismatch::kind(Self::TYPE_NAME, &other)),
        }
    }
}

impl private::Sealed for serde_json::Value {}
impl FromValue for serde_json::Value {
    const TYPE_NAME: &'static str = "serde_json::Value";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Json(v) => Ok(v),
            // Raw JSON payloads arrive as text or bytes from many drivers.
            Value::Text(s) => serde_json::from_str(&s).map_err(|e| Mismatch {
                expected: Self::TYPE_NAME,
                found: format!("TEXT that is not JSON ({e})"),
            }),
            Value::Bytes(b) => serde_json::from_slice(&b).map_err(|e| Mismatch {
                expected: Self::TYPE_NAME,
                found: format!("BYTES that are not JSON ({e})"),
            }),
            other => Err(Mismatch::kind(Self::TYPE_NAME, &other)),
        }
    }
}
