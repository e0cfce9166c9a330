//! Core module containing the record model and the view pipeline

pub mod error;
pub mod filter;
pub mod query;
pub mod record;
pub mod sort;
pub mod value;
pub mod view;

pub use error::{ConsoleError, ConsoleResult};
pub use filter::{ParamFilters, apply_param_filters, apply_search};
pub use query::{ResolvedQuery, ViewQuery};
pub use record::{Column, Record};
pub use sort::{SortDirection, SortDirective, compare_values, sort, toggle_sort};
pub use value::FieldValue;
pub use view::{CollectionView, ViewConfig};
