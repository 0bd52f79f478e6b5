pub mod backup_executor;
pub mod comparator;
pub mod tree_differ;
pub mod tree_walker;
