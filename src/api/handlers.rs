use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

pub struct AppState {
    pub document_path: PathBuf,
}

async fn load_document(state: &AppState) -> Result<serde_json::Value, (StatusCode, String)> {
    let text = tokio::fs::read_to_string(&state.document_path)
        .await
        .map_err(|e| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Season document not available: {e}"),
            )
        })?;
    serde_json::from_str(&text).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Season document is corrupt: {e}"),
        )
    })
}

async fn section(state: &AppState, key: &str) -> Response {
    match load_document(state).await {
        Ok(mut document) => match document.get_mut(key) {
            Some(value) => Json(value.take()).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                format!("Season document has no {key} section"),
            )
                .into_response(),
        },
        Err((code, message)) => (code, message).into_response(),
    }
}

pub async fn get_season(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match load_document(&state).await {
        Ok(document) => Json(document).into_response(),
        Err((code, message)) => (code, message).into_response(),
    }
}

pub async fn get_standings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    section(&state, "season_totals").await
}

pub async fn get_chip_stacks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    section(&state, "chip_and_chair").await
}

pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}
