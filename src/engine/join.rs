//! Keyed union and intersection of two tables

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::model::{normalize_key, reconcile, Row, Table};

use super::RowProjector;

/// Rows of one table keyed by normalized key, in first-seen key order.
///
/// A later row sharing a key replaces the earlier one (last write wins);
/// the key keeps its original position.
pub struct RowMap<'a> {
    rows: IndexMap<String, &'a Row>,
}

impl<'a> RowMap<'a> {
    /// Build the map over `table`'s data rows using column `key_index`
    pub fn build(table: &'a Table, key_index: usize) -> Self {
        let mut rows = IndexMap::with_capacity(table.row_count());
        for row in &table.rows {
            rows.insert(normalize_key(row.get(key_index)), row);
        }
        Self { rows }
    }

    pub fn get(&self, key: &str) -> Option<&'a Row> {
        self.rows.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Output of joining two tables
#[derive(Debug)]
pub struct JoinResult {
    /// Reconciled schema shared by both outputs
    pub schema: Vec<String>,
    pub union: Table,
    pub intersection: Table,
}

/// Join two tables on their key columns.
///
/// A key present in both tables yields two rows, A's projection followed by
/// B's, in both the union and the intersection. Union keys come in A's order
/// followed by B-only keys in B's order; intersection keys follow A's order.
pub fn join_tables(a: &Table, key_a: &str, b: &Table, key_b: &str) -> Result<JoinResult> {
    let key_index_a = a.resolve_column(key_a)?;
    let key_index_b = b.resolve_column(key_b)?;

    let map_a = RowMap::build(a, key_index_a);
    let map_b = RowMap::build(b, key_index_b);
    debug!(
        left_rows = a.row_count(),
        left_keys = map_a.len(),
        right_rows = b.row_count(),
        right_keys = map_b.len(),
        "built row maps"
    );

    let schema = reconcile(&a.header_names(), Some(b.header_names().as_slice()));
    let project_a = RowProjector::new(a, &schema);
    let project_b = RowProjector::new(b, &schema);

    let mut union = output_table(&schema);
    let mut intersection = output_table(&schema);

    let union_keys = map_a
        .keys()
        .chain(map_b.keys().filter(|key| !map_a.contains_key(key)));
    for key in union_keys {
        if let Some(row) = map_a.get(key) {
            push_projected(&mut union, &project_a, row);
        }
        if let Some(row) = map_b.get(key) {
            push_projected(&mut union, &project_b, row);
        }
    }

    for key in map_a.keys() {
        if let (Some(row_a), Some(row_b)) = (map_a.get(key), map_b.get(key)) {
            push_projected(&mut intersection, &project_a, row_a);
            push_projected(&mut intersection, &project_b, row_b);
        }
    }

    debug!(
        union_rows = union.row_count(),
        intersection_rows = intersection.row_count(),
        "joined tables"
    );

    Ok(JoinResult {
        schema,
        union,
        intersection,
    })
}

fn output_table(schema: &[String]) -> Table {
    Table::with_header(schema)
}

fn push_projected(table: &mut Table, projector: &RowProjector, row: &Row) {
    table.add_row(projector.project(row));
}
