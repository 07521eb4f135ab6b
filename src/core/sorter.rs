use crate::domain::model::{Column, ComparisonKind, Direction, SortDirective, TableRow};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Sort key extracted once per row. `None` marks a value that failed to parse.
#[derive(Debug, Clone, PartialEq)]
enum SortKey<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Instant(Option<i64>),
}

pub struct TableSorter;

impl TableSorter {
    /// Returns `rows` ordered by `column` and the directive to keep for the
    /// next call. The input slice is not touched.
    ///
    /// Equal keys keep their input order. Values that fail numeric or date
    /// parsing go to the end in both directions.
    pub fn sort(
        rows: &[TableRow],
        current: SortDirective,
        column: Column,
        kind: ComparisonKind,
    ) -> (Vec<TableRow>, SortDirective) {
        let next = current.next(column);

        let mut keyed: Vec<(SortKey<'_>, &TableRow)> = rows
            .iter()
            .map(|row| (sort_key(column.value(row), kind), row))
            .collect();

        // Vec::sort_by is stable.
        keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, next.direction));

        let sorted = keyed.into_iter().map(|(_, row)| row.clone()).collect();

        tracing::debug!(
            "Sorted {} rows by {} ({:?}, {:?})",
            rows.len(),
            column,
            kind,
            next.direction
        );

        (sorted, next)
    }
}

fn sort_key(value: &str, kind: ComparisonKind) -> SortKey<'_> {
    match kind {
        ComparisonKind::String => SortKey::Text(value),
        ComparisonKind::Numeric => SortKey::Number(parse_number(value)),
        ComparisonKind::Date => SortKey::Instant(parse_date(value)),
    }
}

fn compare_keys(a: &SortKey<'_>, b: &SortKey<'_>, direction: Direction) -> Ordering {
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => apply_direction(a.cmp(b), direction),
        (SortKey::Number(a), SortKey::Number(b)) => {
            compare_parsed(a, b, direction, |x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        }
        (SortKey::Instant(a), SortKey::Instant(b)) => compare_parsed(a, b, direction, |x: &i64, y: &i64| x.cmp(y)),
        // Keys in one call always share a kind.
        _ => Ordering::Equal,
    }
}

fn compare_parsed<T>(
    a: &Option<T>,
    b: &Option<T>,
    direction: Direction,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => apply_direction(cmp(a, b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn apply_direction(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}

pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Milliseconds since the epoch, for RFC 3339, RFC 2822 / HTTP-date, ISO
/// datetimes with `+HHMM` offsets, local ISO datetimes (minutes, seconds or
/// fractional seconds, read as UTC) and bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.timestamp_millis());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.timestamp_millis());
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Manifest rows plus the directive from the last sort, so repeated clicks
/// on one column toggle its direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestTable {
    rows: Vec<TableRow>,
    directive: SortDirective,
}

impl ManifestTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            directive: SortDirective::default(),
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn directive(&self) -> SortDirective {
        self.directive
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sort_by(&mut self, column: Column) {
        self.sort_with(column, column.natural_kind());
    }

    pub fn sort_with(&mut self, column: Column, kind: ComparisonKind) {
        let (rows, directive) = TableSorter::sort(&self.rows, self.directive, column, kind);
        self.rows = rows;
        self.directive = directive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(part: &str, desc: &str, price: &str, date: &str) -> TableRow {
        TableRow {
            part_number: part.to_string(),
            description: desc.to_string(),
            price: price.to_string(),
            date: date.to_string(),
        }
    }

    fn priced(part: &str, price: &str) -> TableRow {
        row(part, "item", price, "2024-01-01")
    }

    fn parts(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.part_number.as_str()).collect()
    }

    #[test]
    fn test_numeric_sort_puts_unparsable_last() {
        let rows = vec![priced("a", "10"), priced("b", "abc"), priced("c", "5")];

        let (asc, directive) =
            TableSorter::sort(&rows, SortDirective::default(), Column::Price, ComparisonKind::Numeric);
        assert_eq!(parts(&asc), vec!["c", "a", "b"]);
        assert_eq!(directive.direction, Direction::Ascending);

        let (desc, directive) =
            TableSorter::sort(&asc, directive, Column::Price, ComparisonKind::Numeric);
        assert_eq!(parts(&desc), vec!["a", "c", "b"]);
        assert_eq!(directive.direction, Direction::Descending);
    }

    #[test]
    fn test_numeric_is_not_lexicographic() {
        let rows = vec![priced("a", "100"), priced("b", "9.99"), priced("c", "25")];
        let (sorted, _) =
            TableSorter::sort(&rows, SortDirective::default(), Column::Price, ComparisonKind::Numeric);
        assert_eq!(parts(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let rows = vec![priced("a", "3"), priced("b", "1"), priced("c", "2")];
        let before = rows.clone();
        let _ = TableSorter::sort(&rows, SortDirective::default(), Column::Price, ComparisonKind::Numeric);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_descending_reverses_ascending_without_ties() {
        let rows = vec![
            row("C-3", "gamma", "1", "2024-01-01"),
            row("A-1", "alpha", "1", "2024-01-01"),
            row("B-2", "beta", "1", "2024-01-01"),
        ];

        let (asc, directive) =
            TableSorter::sort(&rows, SortDirective::default(), Column::PartNumber, ComparisonKind::String);
        let (desc, directive) =
            TableSorter::sort(&asc, directive, Column::PartNumber, ComparisonKind::String);

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
        assert_eq!(directive.direction, Direction::Descending);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let rows = vec![
            row("1", "same", "5", "2024-01-01"),
            row("2", "other", "1", "2024-01-01"),
            row("3", "same", "5", "2024-01-01"),
            row("4", "same", "5", "2024-01-01"),
        ];

        let (asc, directive) =
            TableSorter::sort(&rows, SortDirective::default(), Column::Price, ComparisonKind::Numeric);
        assert_eq!(parts(&asc), vec!["2", "1", "3", "4"]);

        let (desc, _) = TableSorter::sort(&rows, directive, Column::Price, ComparisonKind::Numeric);
        assert_eq!(parts(&desc), vec!["1", "3", "4", "2"]);

        let (by_desc, _) = TableSorter::sort(
            &rows,
            SortDirective::default(),
            Column::Description,
            ComparisonKind::String,
        );
        assert_eq!(parts(&by_desc), vec!["2", "1", "3", "4"]);
    }

    #[test]
    fn test_date_sort_handles_mixed_formats_and_garbage() {
        let rows = vec![
            row("a", "x", "1", "Tue, 05 Mar 2024 00:00:00 GMT"),
            row("b", "x", "1", "not a date"),
            row("c", "x", "1", "2023-12-31"),
            row("d", "x", "1", "2024-06-01T08:30:00Z"),
        ];

        let (asc, directive) =
            TableSorter::sort(&rows, SortDirective::default(), Column::Date, ComparisonKind::Date);
        assert_eq!(parts(&asc), vec!["c", "a", "d", "b"]);

        let (desc, _) = TableSorter::sort(&asc, directive, Column::Date, ComparisonKind::Date);
        assert_eq!(parts(&desc), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_switching_column_resets_to_ascending() {
        let rows = vec![priced("b", "2"), priced("a", "1")];
        let descending = SortDirective {
            column: Some(Column::Price),
            direction: Direction::Descending,
        };

        let (sorted, directive) =
            TableSorter::sort(&rows, descending, Column::PartNumber, ComparisonKind::String);
        assert_eq!(parts(&sorted), vec!["a", "b"]);
        assert_eq!(directive.column, Some(Column::PartNumber));
        assert_eq!(directive.direction, Direction::Ascending);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_date("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_date("1970-01-01 00:00:01"), Some(1_000));
        assert_eq!(parse_date("Thu, 01 Jan 1970 00:00:00 GMT"), Some(0));
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn test_parse_date_iso_variants() {
        let midnight = parse_date("2024-01-01").unwrap();
        let half_eight = midnight + 8 * 3_600_000 + 30 * 60_000;

        assert_eq!(parse_date("2024-01-01T08:30"), Some(half_eight));
        assert_eq!(parse_date("2024-01-01 08:30"), Some(half_eight));
        assert_eq!(parse_date("2024-01-01T08:30:00.123"), Some(half_eight + 123));
        assert_eq!(parse_date("2024-01-01 08:30:00.123456"), Some(half_eight + 123));
        assert_eq!(parse_date("2024-01-01T08:30:00+0000"), Some(half_eight));
        assert_eq!(parse_date("2024-01-01T10:30:00.5+0200"), Some(half_eight + 500));
    }

    #[test]
    fn test_fractional_dates_sort_by_instant() {
        let rows = vec![
            row("late", "x", "1", "2024-01-01 08:30:00.900000"),
            row("early", "x", "1", "2024-01-01T08:30"),
            row("mid", "x", "1", "2024-01-01T08:30:00.123"),
        ];

        let (asc, _) =
            TableSorter::sort(&rows, SortDirective::default(), Column::Date, ComparisonKind::Date);
        assert_eq!(parts(&asc), vec!["early", "mid", "late"]);
    }

    #[test]
    fn test_manifest_table_toggles_on_repeat() {
        let mut table = ManifestTable::new(vec![priced("a", "2"), priced("b", "1"), priced("c", "3")]);

        table.sort_by(Column::Price);
        assert_eq!(parts(table.rows()), vec!["b", "a", "c"]);
        assert_eq!(table.directive().direction, Direction::Ascending);

        table.sort_by(Column::Price);
        assert_eq!(parts(table.rows()), vec!["c", "a", "b"]);
        assert_eq!(table.directive().direction, Direction::Descending);

        table.sort_by(Column::Price);
        assert_eq!(parts(table.rows()), vec!["b", "a", "c"]);
        assert_eq!(table.directive().direction, Direction::Ascending);
    }
}
