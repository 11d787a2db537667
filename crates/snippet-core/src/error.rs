//! Error types for the snippet service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnippetError>;

#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("Snippet not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Could not allocate a unique id after {0} attempts")]
    IdExhausted(usize),
}

impl SnippetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SnippetError::NotFound(_))
    }
}
