//! In-memory snippet store (process-local, lost on restart)

use async_trait::async_trait;
use snippet_core::{short_id, NewSnippet, Result, Snippet, SnippetChanges, SnippetStore};
use tokio::sync::RwLock;

/// Ordered list of snippets guarded by an async lock
pub struct MemoryStore {
    snippets: RwLock<Vec<Snippet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            snippets: RwLock::new(Vec::new()),
        }
    }

    /// Store pre-filled with the two example crash logs.
    pub fn seeded() -> Self {
        Self {
            snippets: RwLock::new(seed_snippets()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnippetStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<Snippet>> {
        let snippets = self.snippets.read().await;
        let limit = limit.unwrap_or(snippets.len());
        Ok(snippets.iter().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Snippet>> {
        let snippets = self.snippets.read().await;
        Ok(snippets.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, fields: NewSnippet) -> Result<Snippet> {
        let mut snippets = self.snippets.write().await;
        let id = short_id::generate_unique(|candidate| snippets.iter().any(|s| s.id == candidate))?;

        let snippet = Snippet::new(id, fields);
        snippets.push(snippet.clone());

        Ok(snippet)
    }

    async fn update(&self, id: &str, changes: SnippetChanges) -> Result<Option<Snippet>> {
        let mut snippets = self.snippets.write().await;
        Ok(snippets.iter_mut().find(|s| s.id == id).map(|snippet| {
            snippet.apply(changes);
            snippet.clone()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut snippets = self.snippets.write().await;
        match snippets.iter().position(|s| s.id == id) {
            Some(index) => {
                snippets.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn seed_snippets() -> Vec<Snippet> {
    const SEEDS: [(&str, &str); 2] = [
        (
            "DBCC2857",
            "ReferenceError: qwüdpkqwdkpokqwpdk is not defined
    at file:///C:/Users/basic/projects/BEAM/mongodb-project/server/index.js:9:1
    at ModuleJob.run (node:internal/modules/esm/module_job:197:25)
    at async Promise.all (index 0)
    at async ESMLoader.import (node:internal/modules/esm/loader:337:24)
    at async loadESM (node:internal/process/esm_loader:88:5)
    at async handleMainPromise (node:internal/modules/run_main:61:12)
[nodemon] app crashed - waiting for file changes before starting...",
        ),
        (
            "6F79257C",
            "console.log(3791827398d7qwe98d7wq9d)
    ^^^^^^^^^^

SyntaxError: Invalid or unexpected token
at ESMLoader.moduleStrategy (node:internal/modules/esm/translators:115:18)
at ESMLoader.moduleProvider (node:internal/modules/esm/loader:289:14)
at async link (node:internal/modules/esm/module_job:70:21)
[nodemon] app crashed - waiting for file changes before starting...
",
        ),
    ];

    SEEDS
        .iter()
        .map(|(id, content)| {
            Snippet::new(
                id.to_string(),
                NewSnippet {
                    title: Some("untitled".to_string()),
                    content: Some(content.to_string()),
                    language: None,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SubsecRound, Utc};
    use std::time::Duration;

    fn fields(title: &str, content: &str) -> NewSnippet {
        NewSnippet {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            language: None,
        }
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = MemoryStore::seeded();

        let snippets = store.list(None).await.unwrap();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].id, "DBCC2857");
        assert_eq!(snippets[1].id, "6F79257C");
        assert_eq!(snippets[0].title.as_deref(), Some("untitled"));
    }

    #[tokio::test]
    async fn test_basic_operations() {
        let store = MemoryStore::new();

        let created = store.insert(fields("t", "c")).await.unwrap();
        assert_eq!(created.id.len(), short_id::ID_LENGTH);

        let found = store.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        assert_eq!(store.find_by_id("ZZZZZZZZ").await.unwrap(), None);

        assert!(store.delete_by_id(&created.id).await.unwrap());
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), None);
        assert!(!store.delete_by_id(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for i in 0..12 {
            ids.push(store.insert(fields(&format!("t{}", i), "c")).await.unwrap().id);
        }

        let listed: Vec<String> = store
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(listed, ids);

        assert_eq!(store.list(Some(5)).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update() {
        let store = MemoryStore::new();
        let created = store.insert(fields("t", "c")).await.unwrap();

        let updated = store
            .update(
                &created.id,
                SnippetChanges {
                    title: Some("t2".to_string()),
                    content: Some("c2".to_string()),
                    language: Some("rust".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title.as_deref(), Some("t2"));
        assert_eq!(updated.content.as_deref(), Some("c2"));
        assert_eq!(updated.language, "rust");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), Some(updated));

        let missing = store
            .update("ZZZZZZZZ", SnippetChanges::default())
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_timestamps_follow_the_clock() {
        let store = MemoryStore::new();

        let before = Utc::now().trunc_subsecs(3);
        let created = store.insert(fields("t", "c")).await.unwrap();
        let after = Utc::now();

        assert!(created.created_at >= before && created.created_at <= after);
        assert_eq!(created.modified_at, created.created_at);

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = store
            .update(
                &created.id,
                SnippetChanges {
                    content: Some("c2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.modified_at > created.modified_at);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(
            store.find_by_id(&created.id).await.unwrap().unwrap().modified_at,
            updated.modified_at
        );
    }
}
