//! Application error type with HTTP response conversion.
//!
//! Every handler returns `Result<_, AppError>`. An [`AppError`] pairs a status code
//! with an [`anyhow::Error`]; client errors echo the message back to the caller,
//! server errors are logged and replaced with a generic message.
//!
//! Store implementations report failures as [`StoreError`], which converts into an
//! [`AppError`] with the status the API contract assigns to each kind.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    /// A 400 listing every violated field of a request schema.
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::bad_request(anyhow::anyhow!("{}", format_validation_errors(errors)))
    }
}

/// Joins the messages of all field errors, ordered by field name.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                error = ?self.error,
                "Request failed with server error"
            );
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({ "error": message }));

        (self.status, body).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::internal(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(&errors)
    }
}

/// Failure reported by the identity provider or a persistence store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),
    /// The write referenced an entity that does not exist.
    #[error("{0}")]
    MissingReference(String),
    /// The provider refused the request for a reason the caller can fix.
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) | StoreError::Rejected(_) | StoreError::InvalidCredentials => {
                AppError::bad_request(err)
            }
            StoreError::MissingReference(_) => AppError::not_found(err),
            StoreError::Internal(source) => AppError::internal(source),
        }
    }
}
