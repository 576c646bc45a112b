//! Table, Row, and Cell data structures

use std::borrow::Cow;

use crate::error::{Result, SheetError};

use super::schema::{Column, HeaderIndex};

/// A cell value with type information
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Formula expression text, not its evaluated result
    Formula(String),
    Empty,
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Number(a), CellValue::Number(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a == b,
            (CellValue::Formula(a), CellValue::Formula(b)) => a == b,
            (CellValue::Empty, CellValue::Empty) => true,
            _ => false,
        }
    }
}

impl CellValue {
    /// Blank text cell used to pad projected rows
    pub fn blank() -> Self {
        CellValue::Text(String::new())
    }

    /// String form used for key derivation.
    ///
    /// Numbers always carry a fractional digit (`2.0`) and switch to
    /// `d.dddE±n` outside `[1e-3, 1e7)`, so the number 2 and the text "2"
    /// are different keys. Formula and Empty cells carry no key text.
    pub fn key_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) => Cow::Owned(number_key_text(*n)),
            CellValue::Boolean(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            CellValue::Formula(_) | CellValue::Empty => Cow::Borrowed(""),
        }
    }
}

fn number_key_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // Shortest round-trip digits and decimal exponent, e.g. "1.2345e3"
    let magnitude = n.abs();
    let scientific = format!("{:e}", magnitude);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if n < 0.0 { "-" } else { "" };

    if !(1e-3..1e7).contains(&magnitude) {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        return format!("{}{}.{}E{}", sign, lead, rest, exponent);
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = exponent as usize + 1;
    if digits.len() > int_len {
        let (int_part, frac) = digits.split_at(int_len);
        format!("{}{}.{}", sign, int_part, frac)
    } else {
        format!("{}{:0<width$}.0", sign, digits, width = int_len)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Formula(expr) => write!(f, "={}", expr),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

/// A row in the table.
///
/// Cells are indexed by column position; `None` marks an absent cell,
/// which is distinct from a present `CellValue::Empty`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Option<CellValue>>,
    /// Original row number in the source sheet (1-indexed, header is 1)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<Option<CellValue>>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Build a row where every position is present
    pub fn dense(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self {
            cells: cells.into_iter().map(Some).collect(),
            source_line,
        }
    }

    /// Get a present cell by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Whether no position holds a cell
    pub fn is_vacant(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Make every position below `width` present, filling gaps with blank text.
    ///
    /// Neither workbooks nor CSV can tell an empty string from a missing
    /// cell, so readers treat every gap under the header as blank text.
    pub fn fill_blanks(&mut self, width: usize) {
        if self.cells.len() < width {
            self.cells.resize(width, None);
        }
        for cell in self.cells.iter_mut().take(width) {
            cell.get_or_insert_with(CellValue::blank);
        }
    }
}

/// A header row plus data rows in source order
#[derive(Debug, Clone)]
pub struct Table {
    /// Header columns; positions may be sparse
    pub columns: Vec<Column>,
    /// Data rows in insertion order
    pub rows: Vec<Row>,
    header_index: HeaderIndex,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        let header_index = HeaderIndex::new(&columns);
        Self {
            columns,
            rows: Vec::new(),
            header_index,
        }
    }

    /// Create a table whose header is the given names at consecutive positions
    pub fn with_header<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Column::new(name.as_ref(), i))
                .collect(),
        )
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Header names in header order
    pub fn header_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get column index by case-insensitive name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header_index.get(name)
    }

    /// Resolve a key column or fail with `ColumnNotFound`
    pub fn resolve_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                column: name.to_string(),
                available: self.columns.iter().map(|c| c.name.clone()).collect(),
            })
    }

    /// Width of the header row: one past the last header position
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.index + 1).max().unwrap_or(0)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
