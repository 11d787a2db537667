//! Snippet Core Library
//!
//! Domain types, the storage port, and short id generation for the snippet
//! service. Storage backends live in the server crate.

pub mod error;
pub mod ports;
pub mod short_id;
pub mod types;

pub use error::{Result, SnippetError};
pub use ports::SnippetStore;
pub use types::*;
