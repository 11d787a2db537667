//! Snippet handlers

use crate::error::ApiError;
use crate::extractors::SnippetFields;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use snippet_core::Snippet;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Snippet>>, ApiError> {
    Ok(Json(state.snippets.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, ApiError> {
    Ok(Json(state.snippets.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    fields: SnippetFields,
) -> Result<Json<Snippet>, ApiError> {
    Ok(Json(state.snippets.create(fields.into_new()).await?))
}

/// Omitted fields keep their stored value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    fields: SnippetFields,
) -> Result<Json<Snippet>, ApiError> {
    Ok(Json(state.snippets.update(&id, fields.into_changes()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    state.snippets.delete(&id).await?;
    Ok("snippet deleted successfully")
}
