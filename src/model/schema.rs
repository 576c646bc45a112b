//! Column metadata, header lookup and schema reconciliation

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Column index (0-based position in the sheet)
    pub index: usize,
}

impl Column {
    /// Create a new column with name and index
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Case-insensitive header name to column position lookup.
///
/// Built once per table so projection does not rescan the header for
/// every cell. When two headers differ only by case, the leftmost wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    by_name: FxHashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(columns: &[Column]) -> Self {
        let mut by_name = FxHashMap::default();
        for column in columns {
            by_name
                .entry(fold_case(&column.name))
                .or_insert(column.index);
        }
        Self { by_name }
    }

    /// Column position for `name`, compared case-insensitively
    pub fn get(&self, name: &str) -> Option<usize> {
        self.by_name.get(&fold_case(name)).copied()
    }
}

fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

/// Ordered, duplicate-free union of header names.
///
/// Keeps first-occurrence order of `a`, then appends names of `b` not yet
/// seen. Names are compared case-sensitively here even though lookups
/// against a table's header are case-insensitive.
pub fn reconcile<'a>(a: &[&'a str], b: Option<&[&'a str]>) -> Vec<String> {
    let mut schema: IndexSet<&str> = a.iter().copied().collect();
    if let Some(b) = b {
        schema.extend(b.iter().copied());
    }
    schema.into_iter().map(str::to_string).collect()
}
