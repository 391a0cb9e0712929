use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use shuk_types::ValidationErrors;
use shuk_types::api::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Invalid token")]
    InvalidCredential,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// `action` is the only text the caller sees; `detail` stays in the log.
    #[error("{action}: {detail:#}")]
    Persistence {
        action: &'static str,
        detail: anyhow::Error,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn persistence(action: &'static str, detail: anyhow::Error) -> Self {
        Self::Persistence { action, detail }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential | ApiError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => ErrorBody {
                error: "Validation failed".into(),
                fields: Some(errors.into_fields()),
            },
            ApiError::Persistence { action, detail } => {
                error!("{}: {:#}", action, detail);
                ErrorBody::new(action)
            }
            ApiError::Timeout => {
                warn!("Request exceeded its deadline");
                ErrorBody::new("Request timed out")
            }
            other => ErrorBody::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_distinct_per_failure_kind() {
        assert_eq!(ApiError::MissingCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Validation(ValidationErrors::default()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::persistence("Failed to fetch listings", anyhow::anyhow!("disk I/O error")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ApiError::NotFound("Listing").to_string(), "Listing not found");
    }
}
