//! Storage trait for snippet persistence

use crate::types::{NewSnippet, Snippet, SnippetChanges};
use crate::Result;
use async_trait::async_trait;

/// Snippet store
///
/// Implemented by the in-process list and by the SQLite table. Every method
/// is a single independent read or write; nothing spans calls.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Short backend name, reported by the health route.
    fn kind(&self) -> &'static str;

    /// List snippets in the backend's natural order, truncated to `limit`.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Snippet>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Snippet>>;

    /// Store a new snippet, assigning its id and timestamps.
    async fn insert(&self, fields: NewSnippet) -> Result<Snippet>;

    /// Apply `changes` to the matching snippet. `None` when no id matches.
    async fn update(&self, id: &str, changes: SnippetChanges) -> Result<Option<Snippet>>;

    /// Returns `true` if a snippet was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;
}
