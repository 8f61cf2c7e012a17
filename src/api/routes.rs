use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{
    admin::{import_ascend_data, save_ascend_data},
    ascend::{get_ascend_data, get_ascend_history, get_game_modes, get_global_leaderboard},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/player/:id/ascend-data", get(get_ascend_data).post(save_ascend_data))
        .route("/api/player/:id/ascend-import", post(import_ascend_data))
        .route("/api/player/:id/ascend-history", get(get_ascend_history))
        .route("/api/global-leaderboard", get(get_global_leaderboard))
        .route("/api/gamemodes", get(get_game_modes))
        .with_state(state)
}
