//! SQLite snippet store (embedded, no external services)

use anyhow::{Context, Result};
use async_trait::async_trait;
use snippet_core::types::snippet::now_millis;
use snippet_core::{short_id, NewSnippet, Snippet, SnippetChanges, SnippetError, SnippetStore};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// Connect using a connection string such as `sqlite://snippets.db`.
    /// In-memory urls get the single pinned connection of `in_memory`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?;

        if is_memory_url(database_url) {
            tracing::warn!("In-memory SQLite database, snippets are lost on restart");
            return Self::open_memory(options).await;
        }

        let options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", database_url))?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::open_memory(SqliteConnectOptions::from_str("sqlite::memory:")?).await
    }

    // An in-memory database lives only as long as its connection, so the
    // pool holds exactly one and never retires it.
    async fn open_memory(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        tracing::info!("SQLite connection established, creating schema...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to create snippets table")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snippets (
                id TEXT PRIMARY KEY,
                title TEXT,
                content TEXT,
                language TEXT NOT NULL DEFAULT 'plaintext',
                created_at DATETIME NOT NULL,
                modified_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_snippets_created_at ON snippets (created_at)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SnippetStore for Database {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    async fn list(&self, limit: Option<usize>) -> snippet_core::Result<Vec<Snippet>> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let rows: Vec<SnippetRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, language, created_at, modified_at
            FROM snippets
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: &str) -> snippet_core::Result<Option<Snippet>> {
        let row: Option<SnippetRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, language, created_at, modified_at
            FROM snippets WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert(&self, fields: NewSnippet) -> snippet_core::Result<Snippet> {
        for _ in 0..short_id::MAX_ATTEMPTS {
            let snippet = Snippet::new(short_id::generate(), fields.clone());

            let result = sqlx::query(
                r#"
                INSERT INTO snippets (id, title, content, language, created_at, modified_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&snippet.id)
            .bind(&snippet.title)
            .bind(&snippet.content)
            .bind(&snippet.language)
            .bind(snippet.created_at)
            .bind(snippet.modified_at)
            .execute(&*self.pool)
            .await;

            match result {
                Ok(_) => return Ok(snippet),
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                    tracing::debug!("Id collision on {}, retrying", snippet.id);
                }
                Err(e) => return Err(db_error(e)),
            }
        }

        Err(SnippetError::IdExhausted(short_id::MAX_ATTEMPTS))
    }

    async fn update(
        &self,
        id: &str,
        changes: SnippetChanges,
    ) -> snippet_core::Result<Option<Snippet>> {
        let row: Option<SnippetRow> = sqlx::query_as(
            r#"
            UPDATE snippets
            SET title = COALESCE(?1, title),
                content = COALESCE(?2, content),
                language = COALESCE(?3, language),
                modified_at = ?4
            WHERE id = ?5
            RETURNING id, title, content, language, created_at, modified_at
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.language)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete_by_id(&self, id: &str) -> snippet_core::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM snippets WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn db_error(e: sqlx::Error) -> SnippetError {
    SnippetError::Database(e.to_string())
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct SnippetRow {
    id: String,
    title: Option<String>,
    content: Option<String>,
    language: String,
    created_at: chrono::DateTime<chrono::Utc>,
    modified_at: chrono::DateTime<chrono::Utc>,
}

impl From<SnippetRow> for Snippet {
    fn from(r: SnippetRow) -> Self {
        Snippet {
            id: r.id,
            title: r.title,
            content: r.content,
            language: r.language,
            created_at: r.created_at,
            modified_at: r.modified_at,
        }
    }
}
