//! Splitting one table into per-key groups

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::model::{normalize_key, Table};

use super::RowProjector;

/// Group `table`'s rows by the normalized value of `key_column`.
///
/// Groups appear in first-seen key order and keep their rows in source
/// order. Each group reuses the source header; its rows are fitted to the
/// header width, with absent cells written as blank text.
pub fn partition_by_column(table: &Table, key_column: &str) -> Result<IndexMap<String, Table>> {
    let key_index = table.resolve_column(key_column)?;
    let projector = RowProjector::positional(table.width());

    let mut groups: IndexMap<String, Table> = IndexMap::new();
    for row in &table.rows {
        let key = normalize_key(row.get(key_index));
        groups
            .entry(key)
            .or_insert_with(|| Table::new(table.columns.clone()))
            .add_row(projector.project(row));
    }

    debug!(
        rows = table.row_count(),
        groups = groups.len(),
        "partitioned table"
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use crate::model::{CellValue, Column, Row};

    fn offices() -> Table {
        let mut table = Table::with_header(&["ID", "City"]);
        let rows = [
            ("1", "New York"),
            ("2", "LA"),
            ("3", "new-york"),
            ("4", "Berlin"),
            ("5", "L.A."),
        ];
        for (i, (id, city)) in rows.iter().enumerate() {
            table.add_row(Row::dense(
                vec![CellValue::from(*id), CellValue::from(*city)],
                i + 2,
            ));
        }
        table
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let groups = partition_by_column(&offices(), "city").unwrap();
        assert_eq!(
            groups.keys().collect::<Vec<_>>(),
            vec!["newyork", "la", "berlin"]
        );

        let ids = |key: &str| -> Vec<String> {
            groups[key].rows.iter().map(|r| r.get(0).unwrap().to_string()).collect()
        };
        assert_eq!(ids("newyork"), vec!["1", "3"]);
        assert_eq!(ids("la"), vec!["2", "5"]);
        assert_eq!(ids("berlin"), vec!["4"]);
    }

    #[test]
    fn test_every_row_lands_in_exactly_one_group() {
        let table = offices();
        let groups = partition_by_column(&table, "City").unwrap();

        let total: usize = groups.values().map(Table::row_count).sum();
        assert_eq!(total, table.row_count());

        for (key, group) in &groups {
            assert_eq!(group.header_names(), vec!["ID", "City"]);
            for row in &group.rows {
                assert_eq!(&normalize_key(row.get(1)), key);
            }
        }
    }

    #[test]
    fn test_rows_fitted_to_header_width() {
        let mut table = Table::new(vec![Column::new("Key", 0), Column::new("Note", 2)]);
        table.add_row(Row::new(
            vec![Some(CellValue::from("a")), None, None, Some(CellValue::from("extra"))],
            2,
        ));
        table.add_row(Row::new(vec![None, Some(CellValue::Number(1.0))], 3));

        let groups = partition_by_column(&table, "key").unwrap();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["a", ""]);
        assert_eq!(groups["a"].columns, table.columns);
        assert_eq!(
            groups["a"].rows[0].cells,
            vec![
                Some(CellValue::from("a")),
                Some(CellValue::blank()),
                Some(CellValue::blank()),
            ]
        );
        assert_eq!(groups[""].rows[0].get(1), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_unknown_column() {
        let err = partition_by_column(&offices(), "Zip").unwrap_err();
        assert!(matches!(err, SheetError::ColumnNotFound { .. }));
    }
}
