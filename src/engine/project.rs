//! Re-expressing rows under a target schema

use crate::model::{CellValue, Row, Table};

/// Maps rows of one source table onto a target schema.
///
/// The target-position to source-column mapping is resolved once from the
/// source table's header, so projecting a row is a single pass.
pub struct RowProjector {
    sources: Vec<Option<usize>>,
}

impl RowProjector {
    /// Build a projector from `source`'s header onto `schema`
    pub fn new<S: AsRef<str>>(source: &Table, schema: &[S]) -> Self {
        let sources = schema
            .iter()
            .map(|name| source.column_index(name.as_ref()))
            .collect();
        Self { sources }
    }

    /// Positional projector: target position `i` reads source position `i`
    pub fn positional(width: usize) -> Self {
        Self {
            sources: (0..width).map(Some).collect(),
        }
    }

    /// Project a row. Present cells are copied verbatim, type included;
    /// absent cells and unmatched columns become blank text.
    pub fn project(&self, row: &Row) -> Row {
        let cells = self
            .sources
            .iter()
            .map(|source| {
                source
                    .and_then(|idx| row.get(idx))
                    .cloned()
                    .unwrap_or_else(CellValue::blank)
            })
            .collect();
        Row::dense(cells, row.source_line)
    }

    /// Width of every projected row
    pub fn width(&self) -> usize {
        self.sources.len()
    }
}
