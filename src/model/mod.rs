//! Data model for tabular data representation

mod key;
mod schema;
mod table;

pub use key::{normalize_key, normalize_text};
pub use schema::{reconcile, Column, HeaderIndex};
pub use table::{CellValue, Row, Table};
