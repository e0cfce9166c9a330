//! Record and column traits defining the accessor registry for list screens

use crate::core::error::ViewError;
use crate::core::value::FieldValue;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed set of column keys for one record type.
///
/// Column sets are plain enums, usually generated with
/// [`define_columns!`](crate::define_columns). Because the set is closed, an
/// accessor can never be asked for a column it does not know about; keys
/// arriving as strings (URL parameters, config files) are checked once with
/// [`Column::parse`] and rejected there.
pub trait Column: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every column of the set, in declaration order
    fn all() -> &'static [Self];

    /// The stable string key of this column (e.g. `"patient_username"`)
    fn key(&self) -> &'static str;

    /// Name of the record type, used in error messages
    fn record_name() -> &'static str;

    /// Look up a column by key
    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.key() == key)
    }

    /// Look up a column by key, failing on unknown keys
    fn parse(key: &str) -> Result<Self, ViewError> {
        Self::from_key(key).ok_or_else(|| ViewError::UnknownColumn {
            record: Self::record_name().to_string(),
            key: key.to_string(),
        })
    }
}

/// A flat, read-only record displayed as one table row.
///
/// Implementors provide one total accessor, [`Record::value`], mapping each
/// column to a comparable scalar. The same accessor feeds sorting, free-text
/// search and exact-match filters, so a derived column (a file name cut from
/// a path, a label computed from flags) is computed identically everywhere.
pub trait Record: Clone + Send + Sync + 'static {
    /// The column set of this record type
    type Column: Column;

    /// Get the identifier of this record
    fn id(&self) -> &str;

    /// Get the comparable value of a column. Missing data yields null.
    fn value(&self, column: Self::Column) -> FieldValue;

    /// Columns searched by free text when no screen override is configured
    fn searchable_columns() -> &'static [Self::Column];

    /// Navigation parameters that act as exact-match filters
    ///
    /// Maps a query parameter name (e.g. `"patientId"`) to the column it
    /// constrains.
    fn param_filters() -> &'static [(&'static str, Self::Column)] {
        &[]
    }

    /// Find the column constrained by a navigation parameter
    fn param_column(param: &str) -> Option<Self::Column> {
        Self::param_filters()
            .iter()
            .find(|(name, _)| *name == param)
            .map(|(_, column)| *column)
    }
}
