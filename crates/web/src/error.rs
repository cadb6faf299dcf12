use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scrimhub_storage::error::{ServiceError, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// JSON body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Service(ServiceError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(e) => write!(f, "Service error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl WebError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Service(ServiceError::NotFound) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Service(ServiceError::NotAuthorized) => (StatusCode::FORBIDDEN, "NOT_AUTHORIZED"),
            Self::Service(ServiceError::DuplicateRegistration) => {
                (StatusCode::CONFLICT, "DUPLICATE_REGISTRATION")
            }
            Self::Service(ServiceError::CapacityExceeded) => {
                (StatusCode::CONFLICT, "CAPACITY_EXCEEDED")
            }
            Self::Service(ServiceError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, "INVALID_TRANSITION")
            }
            Self::Service(ServiceError::AlreadyHappened) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ALREADY_HAPPENED")
            }
            Self::Service(ServiceError::StoreUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
            }
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, code) = self.status_and_code();

        let (error, details) = match &self {
            Self::Service(ServiceError::StoreUnavailable(e)) => {
                tracing::error!("Storage error: {:?}", e);
                ("An internal error occurred".to_string(), Vec::new())
            }
            Self::Service(e) => (e.to_string(), Vec::new()),
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

                ("Validation failed".to_string(), field_errors)
            }
            Self::BadRequest(msg) => (msg.clone(), Vec::new()),
            Self::Unauthorized(msg) => (msg.clone(), Vec::new()),
        };

        let body = ErrorResponse {
            error,
            code: code.to_string(),
            details,
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<ServiceError> for WebError {
    fn from(error: ServiceError) -> Self {
        Self::Service(error)
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Service(ServiceError::from(error))
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
