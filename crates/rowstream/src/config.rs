//! Stream configuration.

use std::borrow::Cow;
use std::num::NonZeroU64;

/// Policy for two fields annotated with the same column name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateNames {
    /// The field declared last owns the column. A warning is logged.
    #[default]
    LastWins,
    /// Building the field map fails with a mapping error.
    Reject,
}

/// Configuration for a stream.
///
/// # Example
///
/// ```rust,ignore
/// use rowstream::{DuplicateNames, StreamConfig};
///
/// let config = StreamConfig::default()
///     .tag_key("sql")
///     .duplicate_names(DuplicateNames::Reject);
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Annotation key holding the column name.
    ///
    /// Default: `db`.
    tag_key: Cow<'static, str>,

    /// What to do when two fields claim the same column.
    ///
    /// Default: [`DuplicateNames::LastWins`].
    duplicate_names: DuplicateNames,

    /// Emit a progress event every this many rows.
    ///
    /// Default: disabled.
    progress_interval: Option<NonZeroU64>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tag_key: Cow::Borrowed(Self::DEFAULT_TAG_KEY),
            duplicate_names: DuplicateNames::LastWins,
            progress_interval: None,
        }
    }
}

impl StreamConfig {
    /// Annotation key used when none is configured.
    pub const DEFAULT_TAG_KEY: &'static str = "db";

    /// Set the annotation key holding the column name.
    #[must_use]
    pub fn tag_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Set the duplicate column name policy.
    #[must_use]
    pub const fn duplicate_names(mut self, policy: DuplicateNames) -> Self {
        self.duplicate_names = policy;
        self
    }

    /// Log progress every `rows` rows.
    #[must_use]
    pub const fn progress_interval(mut self, rows: NonZeroU64) -> Self {
        self.progress_interval = Some(rows);
        self
    }

    /// Returns the configured annotation key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.tag_key
    }

    /// Returns the duplicate column name policy.
    #[must_use]
    pub const fn duplicates(&self) -> DuplicateNames {
        self.duplicate_names
    }

    /// Returns the progress interval, if enabled.
    #[must_use]
    pub const fn progress(&self) -> Option<NonZeroU64> {
        self.progress_interval
    }
}
