use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Generic message for server-side failures; details stay in the logs.
pub const SERVER_ERROR_MESSAGE: &str = "Failed to process request";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        match &self {
            AppError::InvalidInput(_) | AppError::Unauthorized => {
                tracing::warn!(code = self.code().as_str(), error = %self, "Request rejected");
            }
            AppError::Store(_) | AppError::Internal(_) => {
                tracing::error!(code = self.code().as_str(), error = %self, "Request failed");
            }
        }

        match self {
            AppError::InvalidInput(msg) => error_resp(StatusCode::BAD_REQUEST, &msg),
            AppError::Unauthorized => error_resp(StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::Store(_) | AppError::Internal(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
        }
    }
}

fn error_resp(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
