use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::api::models::{AscendResponse, GameModesResponse, HistoryResponse, LeaderboardResponse, ModeParams};
use super::{error_response, rejected, AppState};

/// Path id and query string, or the envelope describing why they were rejected.
fn player_request(
    player_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<ModeParams>, QueryRejection>,
) -> Result<(i64, ModeParams), Response> {
    let Path(player_id) = player_id.map_err(|r| rejected(r.status(), r.body_text()))?;
    let Query(params) = params.map_err(|r| rejected(r.status(), r.body_text()))?;
    Ok((player_id, params))
}

pub async fn get_ascend_data(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<ModeParams>, QueryRejection>,
) -> impl IntoResponse {
    let (player_id, params) = match player_request(player_id, params) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let gamemode = state.gamemode(params.gamemode);

    match state.service.get_or_create(player_id, &gamemode) {
        Ok(record) => Json(AscendResponse::new(record.view())).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_ascend_history(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<ModeParams>, QueryRejection>,
) -> impl IntoResponse {
    let (player_id, params) = match player_request(player_id, params) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let limit = params.limit();
    let gamemode = state.gamemode(params.gamemode);

    match state.service.history(player_id, &gamemode, limit) {
        Ok(history) => Json(HistoryResponse {
            success: true,
            history,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_global_leaderboard(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ModeParams>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match params {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };
    let limit = params.limit();
    let gamemode = state.gamemode(params.gamemode);

    match state.service.leaderboard(&gamemode, limit) {
        Ok(leaderboard) => Json(LeaderboardResponse {
            success: true,
            leaderboard,
            gamemode,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_game_modes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.list_game_modes() {
        Ok(gamemodes) => Json(GameModesResponse {
            success: true,
            gamemodes,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
