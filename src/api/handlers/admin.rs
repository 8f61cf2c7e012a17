use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{AscendResponse, ImportRequest, ImportResponse, SaveEvaluationRequest};
use super::{error_response, rejected, unauthorized, AppState};

pub async fn save_ascend_data(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<SaveEvaluationRequest>, JsonRejection>,
) -> impl IntoResponse {
    if !state.is_admin(&headers) {
        return unauthorized();
    }
    let Path(player_id) = match player_id {
        Ok(path) => path,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    let input = request.to_input();
    let gamemode = state.gamemode(request.gamemode());

    match state.service.upsert_evaluation(player_id, &gamemode, input) {
        Ok(record) => Json(AscendResponse::new(record.view())).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn import_ascend_data(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> impl IntoResponse {
    if !state.is_admin(&headers) {
        return unauthorized();
    }
    let Path(player_id) = match player_id {
        Ok(path) => path,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejected(rejection.status(), rejection.body_text()),
    };

    let gamemode = state.gamemode(request.gamemode());
    let outcome = state.service.import_scores(
        player_id,
        &gamemode,
        &request.import_data,
        request.evaluator_name(),
        request.comment(),
    );

    match outcome {
        Ok(outcome) => Json(ImportResponse {
            success: true,
            ascend: outcome.record.view(),
            imported_fields: outcome.imported_fields,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
