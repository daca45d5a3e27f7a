//! Error-to-status mapping.
//!
//! # Status Mapping
//! - NotFound → 404
//! - Validation → 400 with `[{"Field", "Message"}]`
//! - Malformed / InvalidPrices → 400 with a short text message
//! - Internal → 500
//!
//! Every error is logged before it is rendered. Only validation errors
//! expose structured detail to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::{FieldError, PriceError};
use crate::repository::RepositoryError;

/// Errors surfaced by the product handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("can't find product")]
    NotFound,

    #[error("product validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Malformed(&'static str),

    #[error(transparent)]
    InvalidPrices(#[from] PriceError),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Malformed(_) | ApiError::InvalidPrices(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ApiError::NotFound,
            RepositoryError::Poisoned => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::Validation(errors) => {
                for e in &errors {
                    tracing::info!(field = %e.field, message = %e.message, "Validation error");
                }
                (status, Json(errors)).into_response()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(status = %status, error = %other, "Request failed");
                } else {
                    tracing::warn!(status = %status, error = %other, "Request rejected");
                }
                (status, other.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    #[test]
    fn test_repository_errors_map_to_status() {
        let not_found: ApiError = RepositoryError::NotFound(ProductId(1)).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let poisoned: ApiError = RepositoryError::Poisoned.into();
        assert_eq!(poisoned.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_variants() {
        assert_eq!(ApiError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Malformed("x").status(), StatusCode::BAD_REQUEST);

        let err: ApiError = PriceError::DefaultCurrency.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "only for additional currencies");
    }

    #[test]
    fn test_validation_renders_field_list() {
        let response =
            ApiError::Validation(vec![FieldError::new("Name", "can not be empty")]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
