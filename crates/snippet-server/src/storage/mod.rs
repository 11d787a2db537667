//! Storage layer
//!
//! Two interchangeable `SnippetStore` backends: a process-local list and an
//! embedded SQLite table.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;
