use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::config::settings::AppConfig;
use crate::errors::AscendError;
use crate::services::ascend::AscendService;

use super::models::ErrorResponse;

pub mod admin;
pub mod ascend;

pub struct AppState {
    pub service: AscendService,
    pub config: AppConfig,
}

impl AppState {
    pub fn gamemode(&self, requested: Option<String>) -> String {
        requested
            .filter(|mode| !mode.trim().is_empty())
            .unwrap_or_else(|| self.config.ascend.default_game_mode.to_string())
    }

    pub fn is_admin(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.config.server.admin_token);
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .is_some_and(|value| value == expected)
    }
}

pub fn unauthorized() -> Response {
    (StatusCode::FORBIDDEN, Json(ErrorResponse::new("Unauthorized"))).into_response()
}

/// Extractor failures (malformed JSON, bad path or query) still answer
/// with the error envelope.
pub fn rejected(status: StatusCode, message: String) -> Response {
    log::warn!("Rejected request ({}): {}", status, message);
    (status, Json(ErrorResponse::new(message))).into_response()
}

pub fn error_response(err: AscendError) -> Response {
    let status = match &err {
        AscendError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
        AscendError::EmptyImport => StatusCode::BAD_REQUEST,
        AscendError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        log::error!("{}", err);
    } else {
        log::warn!("{}", err);
    }
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_by_kind() {
        assert_eq!(error_response(AscendError::PlayerNotFound(7)).status(), StatusCode::NOT_FOUND);
        assert_eq!(error_response(AscendError::EmptyImport).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_response(AscendError::Storage(anyhow::anyhow!("disk full"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            rejected(StatusCode::UNPROCESSABLE_ENTITY, "bad body".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
