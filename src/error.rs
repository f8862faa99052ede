use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by handlers and the services behind them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before anything was persisted.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// Bad credentials or no active session.
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(errors) => (status, Json(json!({ "errors": errors }))).into_response(),
            Self::Unauthorized(message) => (status, Json(json!({ "error": message }))).into_response(),
            Self::Internal(e) => {
                // details stay in the logs
                error!(error = ?e, "internal error");
                (status, Json(json!({ "error": "Internal server error" }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_renders_errors_list() {
        let (status, body) = body_json(ApiError::Validation(vec![
            "Title can't be blank".into(),
            "Instructions must be at least 50 characters long".into(),
        ]))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unauthorized_renders_single_error() {
        let (status, body) = body_json(ApiError::Unauthorized("Unauthorized")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn internal_hides_cause() {
        let (status, body) =
            body_json(ApiError::Internal(anyhow::anyhow!("connection refused"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
