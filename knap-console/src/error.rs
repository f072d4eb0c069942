//! Standardized error handling for console responses
//!
//! Every route renders HTML, so errors are rendered as a small HTML error
//! page carrying the real status code instead of a 200 with a success view.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

/// API error types with standardized responses
#[derive(Debug)]
pub enum ApiError {
    /// 500 Internal Server Error
    Internal(String),

    /// 404 Not Found
    NotFound(String),

    /// 400 Bad Request
    BadRequest(String),

    /// 409 Conflict
    Conflict(String),

    /// 422 Unprocessable Entity
    ValidationError(String),

    /// 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Short error title shown on the rendered page
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::Internal(_) => "Internal Server Error",
            ApiError::NotFound(_) => "Not Found",
            ApiError::BadRequest(_) => "Bad Request",
            ApiError::Conflict(_) => "Conflict",
            ApiError::ValidationError(_) => "Validation Error",
            ApiError::ServiceUnavailable(_) => "Service Unavailable",
        }
    }

    /// Human-readable error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Internal(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::ValidationError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Render the error as a self-contained HTML page
    ///
    /// Deliberately independent of the template registry so error reporting
    /// cannot itself fail.
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n\
             <h1>{title}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to console</a></p>\n\
             </body>\n</html>\n",
            title = self.title(),
            message = handlebars::html_escape(self.message()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            error!("Internal API error: {}", self.message());
        }

        (self.status(), Html(self.to_html())).into_response()
    }
}

impl From<knap_common::Error> for ApiError {
    fn from(err: knap_common::Error) -> Self {
        match err {
            knap_common::Error::EngineNotFound(name) => {
                ApiError::NotFound(format!("Engine '{}' not found", name))
            }
            knap_common::Error::Validation(msg) => ApiError::ValidationError(msg),
            knap_common::Error::System(msg) => ApiError::Internal(msg),
            knap_common::Error::Io(e) => ApiError::Internal(format!("I/O error: {}", e)),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(format!("I/O error: {}", err))
    }
}

impl From<handlebars::RenderError> for ApiError {
    fn from(err: handlebars::RenderError) -> Self {
        ApiError::Internal(format!("Template rendering failed: {}", err))
    }
}
