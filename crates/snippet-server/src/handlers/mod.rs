//! HTTP handlers

pub mod health;
pub mod snippets;

pub use health::{health, root};
