//! Navigation query parameters for list screens

use crate::core::error::ViewError;
use crate::core::filter::ParamFilters;
use crate::core::record::Record;
use crate::core::sort::SortDirective;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Query parameters of a list screen URL
///
/// This structure is deserialized from whatever the navigation layer hands
/// over (a parsed query string, a JSON object, ...). `search` and `sort` are
/// reserved; every other parameter is a candidate exact-match filter and is
/// only applied if the record type maps it to a column.
///
/// # Example
/// ```text
/// /videos?patientId=5
/// /analyses?patientId=5&videoId=12&sort=id:desc
/// /users?tab=patients&doctorId=3&search=smi
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    /// Free-text search term
    pub search: Option<String>,

    /// Sort directive as `column` or `column:asc|desc`
    pub sort: Option<String>,

    /// All remaining parameters
    #[serde(flatten)]
    pub params: BTreeMap<String, String>,
}

/// A query resolved against the columns of one record type
#[derive(Debug, Clone)]
pub struct ResolvedQuery<T: Record> {
    pub filters: ParamFilters<T::Column>,
    pub search_term: String,
    pub sort: SortDirective<T::Column>,
}

impl ViewQuery {
    /// Build a query from `(name, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = ViewQuery::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "search" => query.search = Some(value),
                "sort" => query.sort = Some(value),
                _ => {
                    query.params.insert(key, value);
                }
            }
        }
        query
    }

    /// Get a non-empty parameter value
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Resolve parameters against the columns of `T`
    ///
    /// Parameters that `T` does not map to a column (such as `tab`) are
    /// ignored. Empty values count as absent. An unknown sort column is an
    /// error.
    pub fn resolve<T: Record>(&self) -> Result<ResolvedQuery<T>, ViewError> {
        let mut filters = ParamFilters::new();
        for (name, value) in &self.params {
            if value.is_empty() {
                continue;
            }
            match T::param_column(name) {
                Some(column) => filters.set(column, value.as_str()),
                None => tracing::trace!(param = %name, "query parameter ignored"),
            }
        }

        let sort = match self.sort.as_deref() {
            Some(s) => SortDirective::parse(s)?,
            None => SortDirective::Unsorted,
        };

        Ok(ResolvedQuery {
            filters,
            search_term: self.search.clone().unwrap_or_default(),
            sort,
        })
    }
}
