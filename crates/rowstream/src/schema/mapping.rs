//! Column name to record field mapping.
//!
//! Built once per stream from a record's field annotations.

use std::any::type_name;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::tag::Tags;
use crate::config::{DuplicateNames, StreamConfig};
use crate::conversion::binder::RowBinder;
use crate::traits::record::{FieldSpec, Record};
use crate::{Result, StreamError};

/// Mapping from external column name to a field of `R`.
///
/// # Example
///
/// ```rust,ignore
/// use rowstream::{FieldMap, StreamConfig};
///
/// let map = FieldMap::<User>::build(&StreamConfig::default())?;
/// assert!(map.contains("user_id"));
/// ```
pub struct FieldMap<R> {
    fields: Vec<FieldSpec<R>>,
    by_column: HashMap<String, usize>,
}

impl<R> std::fmt::Debug for FieldMap<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMap")
            .field("record", &type_name::<R>())
            .field("fields", &format!("[{} fields]", self.fields.len()))
            .field("by_column", &self.by_column)
            .finish()
    }
}

impl<R: Record> FieldMap<R> {
    /// Build the mapping for `R` using the configured annotation key.
    ///
    /// # Errors
    ///
    /// - invalid destination if `R` declares no fields
    /// - mapping error if an annotation is malformed, lacks the key, names an
    ///   empty column, or (with [`DuplicateNames::Reject`]) repeats a name
    pub fn build(config: &StreamConfig) -> Result<Self> {
        Self::from_fields(R::fields(), config)
    }
}

impl<R> FieldMap<R> {
    /// Build the mapping from an explicit field table.
    ///
    /// # Errors
    ///
    /// See [`FieldMap::build`].
    pub fn from_fields(fields: Vec<FieldSpec<R>>, config: &StreamConfig) -> Result<Self> {
        if fields.is_empty() {
            return Err(StreamError::invalid_destination(
                type_name::<R>(),
                "record declares no bindable fields",
            ));
        }

        let key = config.key();
        let mut by_column = HashMap::with_capacity(fields.len());

        for (index, spec) in fields.iter().enumerate() {
            let tags = Tags::parse(spec.annotation())
                .map_err(|e| StreamError::mapping(spec.name(), e.to_string()))?;
            let tag = tags
                .get(key)
                .map_err(|e| StreamError::mapping(spec.name(), format!("{e}: `{key}`")))?;
            if tag.name.is_empty() {
                return Err(StreamError::mapping(
                    spec.name(),
                    format!("tag `{key}` names an empty column"),
                ));
            }

            match by_column.entry(tag.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
                Entry::Occupied(mut slot) => {
                    let previous: &FieldSpec<R> = &fields[*slot.get()];
                    match config.duplicates() {
                        DuplicateNames::Reject => {
                            return Err(StreamError::mapping(
                                spec.name(),
                                format!(
                                    "column `{}` is already mapped to field `{}`",
                                    tag.name,
                                    previous.name()
                                ),
                            ));
                        }
                        DuplicateNames::LastWins => {
                            tracing::warn!(
                                record = type_name::<R>(),
                                column = %tag.name,
                                replaced = previous.name(),
                                field = spec.name(),
                                "duplicate column annotation, last field wins"
                            );
                            slot.insert(index);
                        }
                    }
                }
            }
        }

        Ok(Self { fields, by_column })
    }

    /// Resolve a column set against this mapping.
    ///
    /// The returned binder borrows both the map and `columns`.
    ///
    /// # Errors
    ///
    /// Returns a bind error naming the first column with no mapped field.
    pub fn resolve<'a>(&'a self, columns: &'a [String]) -> Result<RowBinder<'a, R>> {
        let plan = columns
            .iter()
            .map(|column| {
                self.by_column.get(column).copied().ok_or_else(|| {
                    StreamError::bind(None, column.as_str(), "no field is mapped to this column")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RowBinder::new(self, columns, plan))
    }

    /// Field mapped to `column`, if any.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<&FieldSpec<R>> {
        self.by_column.get(column).map(|&i| &self.fields[i])
    }

    /// Field at position `index` of the record's field table.
    pub(crate) fn field_at(&self, index: usize) -> &FieldSpec<R> {
        &self.fields[index]
    }

    /// Returns true if `column` maps to a field.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.by_column.contains_key(column)
    }

    /// Mapped column names, in no particular order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.by_column.keys().map(String::as_str)
    }

    /// Number of mapped columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    /// Returns true if no column is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }
}
