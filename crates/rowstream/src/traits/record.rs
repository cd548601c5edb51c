//! Destination records and their field tables.
//!
//! A [`Record`] describes its fields through a table of [`FieldSpec`]s. Each
//! spec carries the field name, the raw annotation string (struct
//! tag syntax, e.g. `db:"user_id" json:"userId"`) and a setter that assigns a
//! scanned [`Value`] into the field.
//!
//! The table is usually generated with [`record_fields!`](crate::record_fields):
//!
//! ```rust,ignore
//! #[derive(Debug, Default, serde::Serialize)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! rowstream::record_fields!(User {
//!     id => r#"db:"id""#,
//!     name => r#"db:"name""#,
//!     email => r#"db:"email,omitempty""#,
//! });
//! ```

use std::fmt;

use super::field::{FieldValue, Shape};
use crate::types::{Mismatch, Value};

type Setter<R> = Box<dyn Fn(&mut R, Value) -> Result<(), Mismatch> + Send + Sync>;

/// A type that rows can be bound into.
///
/// A fresh `Self::default()` is created for every row, so `Default` must
/// produce the zero value of the record.
///
/// [`Record::fields`] is the complete set of bindable fields. Annotation
/// checks (missing tag key, malformed annotation, duplicate names) run over
/// this table only: a struct field that is not listed is never bound and
/// never reported, so its value is always `Default::default()`.
pub trait Record: Default {
    /// Returns the field table of this record type.
    ///
    /// Called once per stream.
    fn fields() -> Vec<FieldSpec<Self>>;
}

/// One entry of a record's field table.
pub struct FieldSpec<R> {
    name: &'static str,
    annotation: &'static str,
    shape: Shape,
    type_name: &'static str,
    setter: Setter<R>,
}

impl<R> fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("annotation", &self.annotation)
            .field("shape", &self.shape)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl<R: 'static> FieldSpec<R> {
    /// Describe a field from its name, annotation and accessor.
    ///
    /// The accessor returns the field's storage; shape reconciliation is
    /// chosen from the field type `T`.
    #[must_use]
    pub fn new<T: FieldValue + 'static>(
        name: &'static str,
        annotation: &'static str,
        accessor: fn(&mut R) -> &mut T,
    ) -> Self {
        Self {
            name,
            annotation,
            shape: T::SHAPE,
            type_name: T::TYPE_NAME,
            setter: Box::new(move |record, value| T::assign(accessor(record), value)),
        }
    }
}

impl<R> FieldSpec<R> {
    /// Name of the field in the record type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw annotation string of the field.
    #[must_use]
    pub const fn annotation(&self) -> &'static str {
        self.annotation
    }

    /// Shape of the field.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Rust type held by the field (without `Option`).
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Assign a scanned value into this field of `record`.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] when the value does not fit the field.
    pub fn set(&self, record: &mut R, value: Value) -> Result<(), Mismatch> {
        (self.setter)(record, value)
    }
}

/// Implement [`Record`] for a struct from a list of `field => "annotation"`
/// pairs.
///
/// The list is the record's whole field table. Every listed field must carry
/// the configured tag key, otherwise the stream fails with a mapping error.
/// Struct fields left out of the list are not checked: they are never bound
/// and keep their default value in every row.
#[macro_export]
macro_rules! record_fields {
    ($record:ty { $($field:ident => $annotation:expr),* $(,)? }) => {
        impl $crate::Record for $record {
            fn fields() -> ::std::vec::Vec<$crate::FieldSpec<Self>> {
                ::std::vec![
                    $(
                        $crate::FieldSpec::<Self>::new(
                            ::std::stringify!($field),
                            $annotation,
                            |record| &mut record.$field,
                        ),
                    )*
                ]
            }
        }
    };
}
