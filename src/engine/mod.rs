//! Join and partition engines

mod join;
mod partition;
mod project;

pub use join::{join_tables, JoinResult, RowMap};
pub use partition::partition_by_column;
pub use project::RowProjector;
