//! Field shapes and shape reconciliation.
//!
//! A record field is either *definite* (`T`) or *optional* (`Option<T>`).
//! [`FieldValue::assign`] reconciles the shape of the field with the scanned
//! value:
//!
//! | field       | scanned value | result                               |
//! |-------------|---------------|--------------------------------------|
//! | `Option<T>` | concrete      | backing `T` is allocated, `Some(v)`  |
//! | `Option<T>` | `NULL`        | `None`                               |
//! | `T`         | concrete      | converted and assigned               |
//! | `T`         | `NULL`        | mismatch                             |

use super::sealed::{FromValue, private::Sealed};
use crate::types::{Mismatch, Value};

/// Shape of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// The field always holds a value.
    Definite,
    /// The field may be absent (`Option<T>`).
    Optional,
}

/// A type that a record field may have.
///
/// Implemented for every [`FromValue`] type and for `Option` of each.
/// This trait is sealed.
pub trait FieldValue: Sealed + Sized {
    /// Shape of fields of this type.
    const SHAPE: Shape;

    /// Name of the type, used in bind error messages.
    const TYPE_NAME: &'static str;

    /// Assign a scanned value into `slot`, reconciling shapes.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] if the value cannot be held by this field.
    /// `slot` is left untouched on error.
    fn assign(slot: &mut Self, value: Value) -> Result<(), Mismatch>;
}

impl<T: FromValue> Sealed for Option<T> {}

impl<T: FromValue> FieldValue for Option<T> {
    const SHAPE: Shape = Shape::Optional;
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn assign(slot: &mut Self, value: Value) -> Result<(), Mismatch> {
        if value.is_null() {
            *slot = None;
        } else {
            // Convert before touching the slot so a mismatch leaves it unset.
            let backing = T::from_value(value)?;
            *slot = Some(backing);
        }
        Ok(())
    }
}

macro_rules! impl_definite_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const SHAPE: Shape = Shape::Definite;
                const TYPE_NAME: &'static str = <$ty as FromValue>::TYPE_NAME;

                fn assign(slot: &mut Self, value: Value) -> Result<(), Mismatch> {
                    if value.is_null() {
                        return Err(Mismatch {
                            expected: <Self as FieldValue>::TYPE_NAME,
                            found: "NULL (use Option for nullable columns)".to_owned(),
                        });
                    }
                    *slot = <$ty as FromValue>::from_value(value)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_definite_field!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    bool,
    String,
    Vec<u8>,
    Vec<String>,
    serde_json::Value,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        assert_eq!(<String as FieldValue>::SHAPE, Shape::Definite);
        assert_eq!(<Option<String> as FieldValue>::SHAPE, Shape::Optional);
        assert_eq!(<Option<Vec<u8>> as FieldValue>::TYPE_NAME, "Vec<u8>");
    }

    #[test]
    fn test_concrete_into_optional_allocates() {
        let mut slot: Option<String> = None;
        Option::<String>::assign(&mut slot, Value::Text("hi".into())).unwrap();
        assert_eq!(slot.as_deref(), Some("hi"));
    }

    #[test]
    fn test_null_into_optional_is_absent() {
        let mut slot = Some(5_i64);
        Option::<i64>::assign(&mut slot, Value::Null).unwrap();
        assert_eq!(slot, None);
    }

    #[test]
    fn test_null_into_definite_fails() {
        let mut slot = 0_i32;
        let err = i32::assign(&mut slot, Value::Null).unwrap_err();
        assert_eq!(err.expected, "i32");
        assert!(err.found.starts_with("NULL"));
    }

    #[test]
    fn test_mismatch_leaves_slot() {
        let mut slot: Option<bool> = None;
        assert!(Option::<bool>::assign(&mut slot, Value::Int(1)).is_err());
        assert_eq!(slot, None);

        let mut slot = String::from("keep");
        assert!(String::assign(&mut slot, Value::Bool(true)).is_err());
        assert_eq!(slot, "keep");
    }
}
