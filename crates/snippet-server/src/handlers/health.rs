//! Greeting and health handlers

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

pub async fn root() -> &'static str {
    tracing::info!("request received at /");
    "hello!"
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.snippets.store_kind(),
    })
}
