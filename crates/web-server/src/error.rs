use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Converts our custom `AppError` into an HTTP response with the structured
/// `{"error": {"source", "message", "detail"}}` body the API contract uses.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Engine(engine_err) = self;

        let (status, source, message) = match &engine_err {
            EngineError::UnknownCompany(_) => (
                StatusCode::NOT_FOUND,
                "INPUT",
                "Unsupported company".to_string(),
            ),
            EngineError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                "INPUT",
                "Invalid analysis request".to_string(),
            ),
            EngineError::EquityUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                "FILINGS",
                "Equity data could not be obtained".to_string(),
            ),
            EngineError::Provider(_) => (
                StatusCode::BAD_GATEWAY,
                "DATA",
                "An upstream data source failed".to_string(),
            ),
            _ => {
                tracing::error!(error = ?engine_err, "Analysis failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERVER",
                    "An internal error occurred during analysis".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "source": source,
                "message": message,
                "detail": engine_err.to_string(),
            }
        }));
        (status, body).into_response()
    }
}
