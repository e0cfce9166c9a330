//! Sort directive state machine and the stable sort engine

use crate::core::error::ViewError;
use crate::core::record::{Column, Record};
use crate::core::value::FieldValue;
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Direction of the active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Parse `asc`/`desc` (or the long forms), case-insensitively
    pub fn parse(value: &str) -> Result<Self, ViewError> {
        match value.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ViewError::InvalidSortDirection {
                value: value.to_string(),
            }),
        }
    }
}

/// The single-column sort state of a list screen
///
/// Transitions are driven by [`SortDirective::toggle`]: clicking the sorted
/// column flips its direction, clicking any other column sorts it ascending.
/// There is no click that goes back to `Unsorted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirective<C> {
    #[default]
    Unsorted,
    Ascending(C),
    Descending(C),
}

impl<C: Column> SortDirective<C> {
    /// Build a directive from a column and a direction
    pub fn new(column: C, direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => SortDirective::Ascending(column),
            SortDirection::Desc => SortDirective::Descending(column),
        }
    }

    /// The sorted column, if any
    pub fn column(&self) -> Option<C> {
        match self {
            SortDirective::Unsorted => None,
            SortDirective::Ascending(c) | SortDirective::Descending(c) => Some(*c),
        }
    }

    /// The active direction, if any
    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortDirective::Unsorted => None,
            SortDirective::Ascending(_) => Some(SortDirection::Asc),
            SortDirective::Descending(_) => Some(SortDirection::Desc),
        }
    }

    pub fn is_sorted(&self) -> bool {
        !matches!(self, SortDirective::Unsorted)
    }

    /// Next state after the user activates `clicked`
    pub fn toggle(self, clicked: C) -> Self {
        match self {
            SortDirective::Ascending(current) if current == clicked => {
                SortDirective::Descending(clicked)
            }
            _ => SortDirective::Ascending(clicked),
        }
    }

    /// Parse the `column[:asc|:desc]` notation used in navigation URLs
    ///
    /// An empty string means unsorted. A bare column sorts ascending.
    pub fn parse(value: &str) -> Result<Self, ViewError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(SortDirective::Unsorted);
        }

        let (key, direction) = match value.split_once(':') {
            Some((key, dir)) => (key, SortDirection::parse(dir)?),
            None => (value, SortDirection::Asc),
        };

        Ok(Self::new(C::parse(key)?, direction))
    }
}

impl<C: Column> fmt::Display for SortDirective<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.column(), self.direction()) {
            (Some(column), Some(direction)) => {
                write!(f, "{}:{}", column.key(), direction.as_str())
            }
            _ => Ok(()),
        }
    }
}

/// Advance the sort state machine; see [`SortDirective::toggle`]
pub fn toggle_sort<C: Column>(current: SortDirective<C>, clicked: C) -> SortDirective<C> {
    current.toggle(clicked)
}

/// Compare two accessor outputs under a direction
///
/// Null always sorts after non-null, whichever the direction. Only the
/// comparison between two non-null values is reversed for descending order.
pub fn compare_values(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    compare_values_with(a, b, direction, &mut Collator::default())
}

fn compare_values_with(
    a: &FieldValue,
    b: &FieldValue,
    direction: SortDirection,
    collator: &mut Collator,
) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare_with(b, collator);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Order records by the active directive
///
/// The sort is stable: records with equal keys keep their input order.
/// `Unsorted` returns the input order unchanged.
pub fn sort<'a, T, I>(records: I, directive: SortDirective<T::Column>) -> Vec<&'a T>
where
    T: Record,
    I: IntoIterator<Item = &'a T>,
{
    let records: Vec<&'a T> = records.into_iter().collect();
    let (Some(column), Some(direction)) = (directive.column(), directive.direction()) else {
        return records;
    };

    // Each accessor runs once per record rather than once per comparison
    let mut keyed: Vec<(FieldValue, &'a T)> = records
        .into_iter()
        .map(|record| (record.value(column), record))
        .collect();
    let mut collator = Collator::default();
    keyed.sort_by(|(a, _), (b, _)| compare_values_with(a, b, direction, &mut collator));
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_columns! {
        pub enum RowColumn for "row" {
            Id => "id",
            Name => "name",
            Group => "group",
        }
    }

    #[derive(Debug, Clone)]
    struct Row {
        id: &'static str,
        name: Option<&'static str>,
        group: &'static str,
    }

    impl Record for Row {
        type Column = RowColumn;

        fn id(&self) -> &str {
            self.id
        }

        fn value(&self, column: RowColumn) -> FieldValue {
            match column {
                RowColumn::Id => FieldValue::numeric_id(Some(self.id)),
                RowColumn::Name => FieldValue::text(self.name),
                RowColumn::Group => FieldValue::from(self.group),
            }
        }

        fn searchable_columns() -> &'static [RowColumn] {
            &[RowColumn::Name]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "2",
                name: Some("bob"),
                group: "a",
            },
            Row {
                id: "10",
                name: Some("Ann"),
                group: "b",
            },
            Row {
                id: "1",
                name: None,
                group: "a",
            },
        ]
    }

    fn ids(result: &[&Row]) -> Vec<&'static str> {
        result.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_toggle_cycle_on_same_column() {
        let s0 = SortDirective::Unsorted;
        let s1 = toggle_sort(s0, RowColumn::Name);
        let s2 = toggle_sort(s1, RowColumn::Name);
        let s3 = toggle_sort(s2, RowColumn::Name);
        assert_eq!(s1, SortDirective::Ascending(RowColumn::Name));
        assert_eq!(s2, SortDirective::Descending(RowColumn::Name));
        assert_eq!(s3, SortDirective::Ascending(RowColumn::Name));
    }

    #[test]
    fn test_toggle_other_column_resets_to_ascending() {
        for state in [
            SortDirective::Unsorted,
            SortDirective::Ascending(RowColumn::Name),
            SortDirective::Descending(RowColumn::Name),
        ] {
            assert_eq!(
                toggle_sort(state, RowColumn::Id),
                SortDirective::Ascending(RowColumn::Id)
            );
        }
    }

    #[test]
    fn test_sort_numeric_ids() {
        let data = rows();
        let result = sort(&data, SortDirective::Ascending(RowColumn::Id));
        assert_eq!(ids(&result), vec!["1", "2", "10"]);
    }

    #[test]
    fn test_sort_names_nulls_last() {
        let data = rows();
        let result = sort(&data, SortDirective::Ascending(RowColumn::Name));
        assert_eq!(ids(&result), vec!["10", "2", "1"]);
    }

    #[test]
    fn test_sort_descending_keeps_nulls_last() {
        let data = rows();
        let result = sort(&data, SortDirective::Descending(RowColumn::Name));
        assert_eq!(ids(&result), vec!["2", "10", "1"]);
    }

    #[test]
    fn test_unsorted_returns_input() {
        let data = rows();
        let result = sort(&data, SortDirective::Unsorted);
        assert_eq!(ids(&result), vec!["2", "10", "1"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let data = rows();
        let asc = sort(&data, SortDirective::Ascending(RowColumn::Group));
        assert_eq!(ids(&asc), vec!["2", "1", "10"]);
        let desc = sort(&data, SortDirective::Descending(RowColumn::Group));
        assert_eq!(ids(&desc), vec!["10", "2", "1"]);
    }

    #[test]
    fn test_compare_values_null_policy() {
        let null = FieldValue::Null;
        let one = FieldValue::Number(1.0);
        for dir in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(compare_values(&null, &one, dir), Ordering::Greater);
            assert_eq!(compare_values(&one, &null, dir), Ordering::Less);
            assert_eq!(compare_values(&null, &null, dir), Ordering::Equal);
        }
    }

    #[test]
    fn test_parse_directive() {
        assert_eq!(
            SortDirective::<RowColumn>::parse("name:desc").expect("valid"),
            SortDirective::Descending(RowColumn::Name)
        );
        assert_eq!(
            SortDirective::<RowColumn>::parse("id").expect("valid"),
            SortDirective::Ascending(RowColumn::Id)
        );
        assert_eq!(
            SortDirective::<RowColumn>::parse("").expect("valid"),
            SortDirective::Unsorted
        );
    }

    #[test]
    fn test_parse_directive_rejects_unknown() {
        assert!(matches!(
            SortDirective::<RowColumn>::parse("age:asc"),
            Err(ViewError::UnknownColumn { .. })
        ));
        assert!(matches!(
            SortDirective::<RowColumn>::parse("name:sideways"),
            Err(ViewError::InvalidSortDirection { .. })
        ));
    }

    #[test]
    fn test_directive_display_roundtrip() {
        let directive = SortDirective::Descending(RowColumn::Group);
        assert_eq!(directive.to_string(), "group:desc");
        assert_eq!(SortDirective::<RowColumn>::Unsorted.to_string(), "");
    }
}
