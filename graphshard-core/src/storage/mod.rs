pub mod active_set;
pub mod id_tables;

pub use active_set::ActiveSet;
pub use id_tables::{ClusterIndex, IdTables};
