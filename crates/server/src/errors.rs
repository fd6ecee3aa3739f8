use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;

pub const NO_DATA: &str = "No data provided";

/// Error returned by handlers; rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("No data provided")]
    NoData,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::NotFound(_)) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Validation(_))
            | ApiError::Service(ServiceError::Model(ModelError::Validation(_)))
            | ApiError::NoData
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Persistence(_)) | ApiError::Service(ServiceError::Model(ModelError::Db(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Service(e) => e.client_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }
        (status, Json(serde_json::json!({"error": self.message()}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from(ServiceError::NotFound("x".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ServiceError::Validation("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ServiceError::Model(ModelError::Validation("title required".into()))).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NoData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ServiceError::Persistence("Error creating object".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = ApiError::from(ServiceError::Model(ModelError::Db("connection refused".into())));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("connection refused"));
        assert_eq!(ApiError::NoData.message(), NO_DATA);
    }
}
