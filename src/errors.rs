use axum::{
    extract::rejection::{FormRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::error::{DbErr, SqlErr};
use tracing::error;

/// Message shown when a customer cannot be removed because other rows still
/// reference it.
pub const DELETE_BLOCKED_MESSAGE: &str =
    "Unable to delete because of relationship. Press [BACK] and try again";

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Coarse outcome class every handler failure is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or invalid input from the caller
    Invalid,
    /// The addressed row does not exist
    NotFound,
    /// The store rejected the write because of a constraint
    Conflict,
    /// Anything else; details stay in the log
    Internal,
}

impl ErrorClass {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Invalid => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        classify_db_error(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

// Extractor rejections render the same error page as handler failures
impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ServiceError {
    fn from(rejection: FormRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

/// Maps a store error onto the portal's error classes.
///
/// Constraint violations become [`ServiceError::Conflict`], lookups that hit no
/// row become [`ServiceError::NotFound`], everything else stays a database error.
pub fn classify_db_error(err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return ServiceError::Conflict(msg),
        Some(SqlErr::UniqueConstraintViolation(msg)) => return ServiceError::Conflict(msg),
        _ => {}
    }

    match err {
        DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
        DbErr::RecordNotUpdated => ServiceError::NotFound("record no longer exists".to_string()),
        other => ServiceError::DatabaseError(other),
    }
}

impl ServiceError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ValidationError(_) | Self::BadRequest(_) => ErrorClass::Invalid,
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::Conflict(_) => ErrorClass::Conflict,
            Self::DatabaseError(_) | Self::RenderError(_) | Self::InternalError(_) => {
                ErrorClass::Internal
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.class().status_code()
    }

    /// Message safe to show to the caller. Internal failures get a generic text.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::RenderError(_) | Self::InternalError(_) => "Internal server error".to_string(),
            // The delete confirmation flow shows this text verbatim
            Self::Conflict(msg) if msg == DELETE_BLOCKED_MESSAGE => msg.clone(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.class() == ErrorClass::Internal {
            error!(error = %self, "request failed");
        }

        let request_id = current_request_id().unwrap_or_default();
        let reason = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>{code} {reason}</title></head>\n<body>\n<h1>{reason}</h1>\n<p class=\"error-message\">{message}</p>\n<p><small>Request ID: {request_id}</small></p>\n<p><a href=\"/customers\">Back to customers</a></p>\n</body></html>\n",
            code = status.as_u16(),
            reason = reason,
            message = handlebars::html_escape(&self.response_message()),
            request_id = handlebars::html_escape(&request_id),
        );

        (status, Html(body)).into_response()
    }
}
