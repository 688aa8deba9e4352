use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{get_chip_stacks, get_season, get_standings, health, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/season", get(get_season))
        .route("/api/standings", get(get_standings))
        .route("/api/chipstacks", get(get_chip_stacks))
        .with_state(state)
}
