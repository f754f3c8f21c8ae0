use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Instrument validation failure, surfaced as 422.
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl From<ml2_core::EngineError> for ApiError {
    fn from(err: ml2_core::EngineError) -> Self {
        match err {
            ml2_core::EngineError::InvalidInstruments(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            ApiError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
