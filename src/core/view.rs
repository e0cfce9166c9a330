//! The generic collection view model shared by every list screen

use crate::core::filter::{ParamFilters, apply_param_filters, apply_search};
use crate::core::query::ResolvedQuery;
use crate::core::record::{Column, Record};
use crate::core::sort::{SortDirective, sort};

/// Per-screen configuration of a [`CollectionView`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig<C> {
    /// Columns searched by the free-text box
    pub searchable: Vec<C>,
}

impl<C: Column> ViewConfig<C> {
    /// Configuration searching the given columns
    pub fn new(searchable: Vec<C>) -> Self {
        Self { searchable }
    }

    /// Default configuration for a record type
    pub fn for_record<T: Record<Column = C>>() -> Self {
        Self::new(T::searchable_columns().to_vec())
    }
}

/// Filtered, searched and sorted view over a collection of records
///
/// The view owns four independent inputs: the raw records, the parameter
/// filters, the search term and the sort directive. Each setter replaces one
/// input; [`CollectionView::rows`] recomputes the result from the latest
/// value of all four. The raw collection is never reordered or mutated.
///
/// # Example
///
/// ```rust
/// use medadmin::prelude::*;
///
/// let mut view = CollectionView::<Video>::new();
/// view.set_search_term("knee");
/// view.toggle_sort(VideoColumn::CreateTime);
/// assert!(view.rows().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CollectionView<T: Record> {
    config: ViewConfig<T::Column>,
    records: Vec<T>,
    filters: ParamFilters<T::Column>,
    search_term: String,
    sort: SortDirective<T::Column>,
}

impl<T: Record> Default for CollectionView<T> {
    fn default() -> Self {
        Self::with_config(ViewConfig::for_record::<T>())
    }
}

impl<T: Record> CollectionView<T> {
    /// Create an empty view with the record type's default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty view with a screen-specific configuration
    pub fn with_config(config: ViewConfig<T::Column>) -> Self {
        Self {
            config,
            records: Vec::new(),
            filters: ParamFilters::new(),
            search_term: String::new(),
            sort: SortDirective::Unsorted,
        }
    }

    /// Builder-style variant of [`CollectionView::set_records`]
    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.set_records(records);
        self
    }

    /// Replace the raw collection wholesale
    pub fn set_records(&mut self, records: Vec<T>) {
        tracing::debug!(count = records.len(), "collection replaced");
        self.records = records;
    }

    /// Replace every parameter filter
    pub fn set_param_filters(&mut self, filters: ParamFilters<T::Column>) {
        self.filters = filters;
    }

    /// Set or clear a single parameter filter
    pub fn set_param_filter(&mut self, column: T::Column, value: Option<String>) {
        self.filters.set_opt(column, value);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Replace the sort directive
    pub fn set_sort(&mut self, directive: SortDirective<T::Column>) {
        self.sort = directive;
    }

    /// Handle a click on a column header and return the new directive
    pub fn toggle_sort(&mut self, column: T::Column) -> SortDirective<T::Column> {
        self.sort = self.sort.toggle(column);
        tracing::trace!(sort = %self.sort, "sort toggled");
        self.sort
    }

    /// Apply everything a navigation query carries
    pub fn apply_query(&mut self, query: ResolvedQuery<T>) {
        self.filters = query.filters;
        self.search_term = query.search_term;
        self.sort = query.sort;
    }

    pub fn config(&self) -> &ViewConfig<T::Column> {
        &self.config
    }

    /// The raw collection, in insertion order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn param_filters(&self) -> &ParamFilters<T::Column> {
        &self.filters
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_directive(&self) -> SortDirective<T::Column> {
        self.sort
    }

    /// Find a record of the raw collection by id
    ///
    /// Deep links (e.g. `?videoId=12`) use this to open a record whether or
    /// not it survives the current filters.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Compute the view result
    pub fn rows(&self) -> Vec<&T> {
        let filtered = apply_param_filters(&self.records, &self.filters);
        let searched = apply_search(filtered, &self.search_term, &self.config.searchable);
        let ordered = sort(searched, self.sort);

        tracing::trace!(
            total = self.records.len(),
            shown = ordered.len(),
            filters = self.filters.len(),
            sort = %self.sort,
            "view recomputed"
        );
        ordered
    }

    /// Number of rows in the view result
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
