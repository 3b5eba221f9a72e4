//! HTTP error pages and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating [`Error`] into
//! Actix responses here. Failures render the shared error template; internal
//! messages are logged in full but redacted from the response body.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::ports::ProductRepositoryError;
use crate::domain::{Error, ErrorCode};

use super::pages::ErrorPage;

/// Error wrapper returned by page handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageError(Error);

/// Convenience alias for HTTP handlers.
pub type PageResult<T> = Result<T, PageError>;

impl PageError {
    /// The wrapped domain error.
    pub fn inner(&self) -> &Error {
        &self.0
    }

    fn to_status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn response_message(&self) -> &str {
        // Internal details stay in the logs.
        if matches!(self.0.code(), ErrorCode::InternalError) {
            "Something went wrong on our side."
        } else {
            self.0.message()
        }
    }
}

impl From<Error> for PageError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PageError {}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if matches!(self.0.code(), ErrorCode::InternalError) {
            error!(message = %self.0.message(), "request failed with internal error");
        }

        let page = ErrorPage::new(status, self.response_message());
        let body = page
            .render_body()
            .unwrap_or_else(|_| self.response_message().to_owned());
        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body)
    }
}

/// Adapter-level mapping from repository failures to domain errors.
///
/// Misses stay misses; everything else becomes an internal error so callers
/// never leak store detail into a page.
pub fn map_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::NotFound { .. } => Error::not_found("product not found"),
        ProductRepositoryError::Connection { message } | ProductRepositoryError::Query { message } => {
            Error::internal(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductId;
    use rstest::rstest;

    #[rstest]
    fn not_found_keeps_its_code() {
        let mapped = map_repository_error(ProductRepositoryError::not_found(ProductId::new(7)));
        assert_eq!(mapped.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn store_failures_become_internal() {
        let mapped = map_repository_error(ProductRepositoryError::query("disk on fire"));
        assert_eq!(mapped.code(), ErrorCode::InternalError);
        assert_eq!(mapped.message(), "disk on fire");
    }

    #[rstest]
    fn internal_messages_are_redacted_from_responses() {
        let err = PageError::from(Error::internal("connection string leaked"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response_message(), "Something went wrong on our side.");
    }

    #[rstest]
    fn not_found_status_maps_to_404() {
        let err = PageError::from(Error::not_found("product not found"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.response_message(), "product not found");
    }
}
