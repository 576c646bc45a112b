//! sheetmerge - Join and split spreadsheets on a key column
//!
//! Merges two tables into union and intersection spreadsheets, or splits one
//! table into a spreadsheet per key value, and packages the results as a zip.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod ops;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::SheetError;
pub use model::Table;
pub use ops::{merge, split, Output, Report};
