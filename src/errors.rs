use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

/// Errors surfaced by the Fibonacci endpoint. Each one is confined to the
/// request that produced it.
#[derive(Error, Debug)]
pub enum FibError {
    #[error("invalid parameter \"n\": {0}")]
    Validation(String),

    #[error("n = {n} is out of range, must be between 0 and {max} (recursive cost grows exponentially)")]
    Range { n: String, max: u32 },

    #[error("authentication failed")]
    Forbidden,

    #[error("compute task failed: {0}")]
    Internal(String),
}

impl FibError {
    pub fn status(&self) -> StatusCode {
        match self {
            FibError::Validation(_) | FibError::Range { .. } => StatusCode::BAD_REQUEST,
            FibError::Forbidden => StatusCode::FORBIDDEN,
            FibError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tokio::task::JoinError> for FibError {
    fn from(e: tokio::task::JoinError) -> Self {
        FibError::Internal(e.to_string())
    }
}

impl IntoResponse for FibError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_message_cites_bound() {
        let err = FibError::Range { n: "-1".to_string(), max: 45 };
        let msg = err.to_string();
        assert!(msg.contains("between 0 and 45"), "{}", msg);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn statuses() {
        assert_eq!(FibError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(FibError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(FibError::Internal("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
