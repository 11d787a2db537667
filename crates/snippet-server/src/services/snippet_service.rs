//! Snippet service: the route-facing API over an injected store

use snippet_core::{NewSnippet, Result, Snippet, SnippetChanges, SnippetError, SnippetStore};
use std::sync::Arc;
use tracing::{debug, info};

pub struct SnippetService {
    store: Arc<dyn SnippetStore>,
    list_limit: Option<usize>,
}

impl SnippetService {
    /// `list_limit` caps `list`; `None` returns everything.
    pub fn new(store: Arc<dyn SnippetStore>, list_limit: Option<usize>) -> Self {
        Self { store, list_limit }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn list(&self) -> Result<Vec<Snippet>> {
        let snippets = self.store.list(self.list_limit).await?;
        debug!("Listed {} snippets", snippets.len());
        Ok(snippets)
    }

    pub async fn get(&self, id: &str) -> Result<Snippet> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| SnippetError::NotFound(id.to_string()))
    }

    pub async fn create(&self, fields: NewSnippet) -> Result<Snippet> {
        debug!("Creating snippet from {:?}", fields);

        let snippet = self.store.insert(fields).await?;
        info!("Created snippet: id={}, language={}", snippet.id, snippet.language);

        Ok(snippet)
    }

    pub async fn update(&self, id: &str, changes: SnippetChanges) -> Result<Snippet> {
        let snippet = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| SnippetError::NotFound(id.to_string()))?;
        info!("Updated snippet: {}", id);

        Ok(snippet)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete_by_id(id).await? {
            return Err(SnippetError::NotFound(id.to_string()));
        }
        info!("Deleted snippet: {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use tokio_test::{assert_err, assert_ok};

    fn service() -> SnippetService {
        SnippetService::new(Arc::new(MemoryStore::new()), None)
    }

    #[tokio::test]
    async fn test_round_trip() {
        let service = service();

        let created = assert_ok!(
            service
                .create(NewSnippet {
                    title: Some("t".to_string()),
                    content: Some("c".to_string()),
                    language: None,
                })
                .await
        );
        assert_eq!(assert_ok!(service.get(&created.id).await), created);

        let updated = assert_ok!(
            service
                .update(
                    &created.id,
                    SnippetChanges {
                        title: Some("t2".to_string()),
                        content: Some("c2".to_string()),
                        language: None,
                    },
                )
                .await
        );
        assert_eq!(updated.id, created.id);
        assert_eq!(assert_ok!(service.get(&created.id).await), updated);

        assert_ok!(service.delete(&created.id).await);
        let err = assert_err!(service.get(&created.id).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let service = service();

        assert!(service.get("ZZZZZZZZ").await.unwrap_err().is_not_found());
        assert!(service
            .update("ZZZZZZZZ", SnippetChanges::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service.delete("ZZZZZZZZ").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_limit_is_applied() {
        let service = SnippetService::new(Arc::new(MemoryStore::new()), Some(3));
        for _ in 0..5 {
            service.create(NewSnippet::default()).await.unwrap();
        }

        assert_eq!(service.list().await.unwrap().len(), 3);
        assert_eq!(service.store_kind(), "memory");
    }
}
