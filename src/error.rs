use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MeshError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MeshError>;

impl From<std::io::Error> for MeshError {
    fn from(e: std::io::Error) -> Self {
        MeshError::Io(e.to_string())
    }
}

impl MeshError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MeshError::NotFound(_) => StatusCode::NOT_FOUND,
            MeshError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
            MeshError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MeshError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Axum IntoResponse implementation (feature-gated)
#[cfg(feature = "axum-support")]
use axum::response::{IntoResponse, Json, Response};
#[cfg(feature = "axum-support")]
use serde::Serialize;

#[cfg(feature = "axum-support")]
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(feature = "axum-support")]
impl IntoResponse for MeshError {
    fn into_response(self) -> Response {
        let error_code = match &self {
            MeshError::NotFound(_) => "file_not_found",
            MeshError::InvalidFileName(_) => "invalid_file_name",
            MeshError::Io(_) => "io_error",
            MeshError::Config(_) => "config_error",
        };

        if let MeshError::Io(msg) = &self {
            tracing::error!("request failed with IO error: {}", msg);
        }

        let body = ErrorResponse {
            error: error_code.to_string(),
            message: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            MeshError::NotFound("a".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            MeshError::InvalidFileName("..".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MeshError::Io("disk".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MeshError = io.into();
        assert!(matches!(err, MeshError::Io(ref msg) if msg.contains("denied")));
    }
}
