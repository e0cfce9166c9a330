//! Filter pipeline: exact-match navigation filters and free-text search
//!
//! Both stages only decide membership. Records keep their relative order.

use crate::core::record::{Column, Record};
use indexmap::IndexMap;

/// Exact-match constraints sourced from navigation parameters
///
/// A column that is not present in the map is unconstrained. Insertion order
/// is kept so that the active filters can be listed back to the user in the
/// order they were set.
#[derive(Debug, Clone)]
pub struct ParamFilters<C> {
    filters: IndexMap<C, String>,
}

impl<C> Default for ParamFilters<C> {
    fn default() -> Self {
        Self {
            filters: IndexMap::new(),
        }
    }
}

impl<C: Column> ParamFilters<C> {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`ParamFilters::set`]
    pub fn with(mut self, column: C, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Constrain `column` to `value`, replacing any previous constraint
    pub fn set(&mut self, column: C, value: impl Into<String>) {
        self.filters.insert(column, value.into());
    }

    /// Set or clear a constraint; `None` removes it
    pub fn set_opt(&mut self, column: C, value: Option<String>) {
        match value {
            Some(v) => self.set(column, v),
            None => self.remove(column),
        }
    }

    /// Remove the constraint on `column`
    pub fn remove(&mut self, column: C) {
        self.filters.shift_remove(&column);
    }

    /// Get the constraint on `column`
    pub fn get(&self, column: C) -> Option<&str> {
        self.filters.get(&column).map(String::as_str)
    }

    /// Iterate over active constraints in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (C, &str)> {
        self.filters.iter().map(|(c, v)| (*c, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check a record against every constraint
    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Record<Column = C>,
    {
        self.filters
            .iter()
            .all(|(column, expected)| record.value(*column).matches_exact(expected))
    }
}

/// Keep the records matching every parameter filter
///
/// An empty filter set returns every record, in order.
pub fn apply_param_filters<'a, T, I>(records: I, filters: &ParamFilters<T::Column>) -> Vec<&'a T>
where
    T: Record,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|record| filters.matches(*record))
        .collect()
}

/// Keep the records where any searchable column contains the search term
///
/// Matching is case-insensitive. An empty term keeps every record.
pub fn apply_search<'a, T, I>(
    records: I,
    search_term: &str,
    searchable: &[T::Column],
) -> Vec<&'a T>
where
    T: Record,
    I: IntoIterator<Item = &'a T>,
{
    if search_term.is_empty() {
        return records.into_iter().collect();
    }

    let needle = search_term.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            searchable
                .iter()
                .any(|column| record.value(*column).contains_folded(&needle))
        })
        .collect()
}
