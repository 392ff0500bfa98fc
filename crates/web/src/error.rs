use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors. Every failure serializes to the same envelope the
/// success path uses: `{"success": false, "error": "..."}`.
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    #[allow(dead_code)]
    NotFound,
    #[allow(dead_code)]
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "Resource not found"),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_message(&self) -> String {
        match self {
            Self::Storage(StorageError::NotFound) => "Resource not found".to_string(),
            Self::Storage(StorageError::ConstraintViolation(msg)) => msg.clone(),
            Self::Storage(StorageError::Validation(msg)) => msg.clone(),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "An internal error occurred".to_string()
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();
                format!("Validation failed: {}", field_errors.join("; "))
            }
            Self::BadRequest(msg) => msg.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::NotFound => "Resource not found".to_string(),
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.error_message(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_by_error_kind() {
        assert_eq!(
            WebError::Storage(StorageError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::Storage(StorageError::ConstraintViolation("dup".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::Storage(StorageError::Validation("bad".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(WebError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_storage_validation_message_is_passed_through() {
        let err = WebError::Storage(StorageError::Validation(
            "Flight cannot be marked completed: derived status is inProgress".into(),
        ));
        assert!(err.error_message().contains("derived status"));
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = WebError::InternalServerError("connection string with secrets".into());
        assert_eq!(err.error_message(), "An internal error occurred");
    }
}
