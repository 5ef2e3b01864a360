//! Application error handling.
//!
//! Every failure a handler or the admin guard can produce maps to one
//! `AppError`. The actix `ResponseError` impl turns it into a JSON body of the
//! form `{"message": "..."}` and logs it with a generated error id.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

// ============================================================================
// DOMAIN-SPECIFIC ERROR TYPES
// ============================================================================

/// Input validation errors (400)
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// A required field is absent; carries the human label, e.g. "Product name"
    Required(&'static str),
    MissingCredentials,
    InvalidFormat(&'static str),
    TooLong(&'static str, usize),
    OutOfRange(&'static str, i32, i32),
    InvalidRole(String),
    InvalidBody(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required(field) => write!(f, "{} is required", field),
            ValidationError::MissingCredentials => write!(f, "Email and password required"),
            ValidationError::InvalidFormat(field) => write!(f, "{} has invalid format", field),
            ValidationError::TooLong(field, max) => {
                write!(f, "{} is too long (maximum {} characters)", field, max)
            }
            ValidationError::OutOfRange(field, min, max) => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            ValidationError::InvalidRole(role) => write!(f, "Invalid role: {}", role),
            ValidationError::InvalidBody(detail) => write!(f, "Invalid request body: {}", detail),
        }
    }
}

impl StdError for ValidationError {}

/// Database operation errors
#[derive(Debug)]
pub enum DatabaseError {
    UniqueConstraintViolation(String),
    NotFound(&'static str),
    ConnectionPool(String),
    UnexpectedError(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::UniqueConstraintViolation(msg) => write!(f, "Duplicate entry: {}", msg),
            DatabaseError::NotFound(resource) => write!(f, "{} not found", resource),
            DatabaseError::ConnectionPool(msg) => write!(f, "Database connection error: {}", msg),
            DatabaseError::UnexpectedError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl StdError for DatabaseError {}

/// Authentication and authorization errors.
///
/// The `Display` strings are the exact messages returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad email or password at login; never says which
    InvalidCredentials,
    MissingToken,
    MalformedToken(String),
    TokenExpired,
    TokenRevoked,
    /// Valid token whose role does not satisfy the route
    Forbidden,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::MissingToken => write!(f, "Missing Authorization Header"),
            AuthError::MalformedToken(detail) => write!(f, "Invalid token: {}", detail),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenRevoked => write!(f, "Token has been revoked"),
            AuthError::Forbidden => write!(f, "Admins only"),
        }
    }
}

impl StdError for AuthError {}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

// ============================================================================
// UNIFIED APPLICATION ERROR TYPE
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Database(DatabaseError),
    Auth(AuthError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Database(e) => write!(f, "{}", e),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::Database(DatabaseError::NotFound("Record")),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AppError::Database(DatabaseError::UniqueConstraintViolation(
                    db_err.message().to_string(),
                ))
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::Database(DatabaseError::ConnectionPool(err.to_string()))
            }
            _ => AppError::Database(DatabaseError::UnexpectedError(err.to_string())),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(format!("Blocking task failed: {}", err))
    }
}

// ============================================================================
// HTTP RESPONSE MAPPING
// ============================================================================

/// Body of every error response
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Converts errors to HTTP responses with logging
pub trait ErrorHandler {
    fn error_response(&self, error_id: &str) -> (StatusCode, ErrorResponse);
    fn log_error(&self, error_id: &str);
}

impl ErrorHandler for AppError {
    fn error_response(&self, _error_id: &str) -> (StatusCode, ErrorResponse) {
        let status = ResponseError::status_code(self);
        let message = match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Database(e) => match e {
                // Only duplicate users reach the client as a conflict
                DatabaseError::UniqueConstraintViolation(_) => "User already exists".to_string(),
                DatabaseError::NotFound(_) => e.to_string(),
                DatabaseError::ConnectionPool(_) => {
                    "Database service temporarily unavailable".to_string()
                }
                DatabaseError::UnexpectedError(_) => "Database error occurred".to_string(),
            },
            AppError::Auth(e) => e.to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        };

        (status, ErrorResponse { message })
    }

    fn log_error(&self, error_id: &str) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Validation error");
            }
            AppError::Database(DatabaseError::UniqueConstraintViolation(_)) => {
                tracing::warn!(error_id = error_id, error = %self, "Duplicate entry attempt");
            }
            AppError::Database(DatabaseError::NotFound(_)) => {
                tracing::info!(error_id = error_id, error = %self, "Resource not found");
            }
            AppError::Database(e) => {
                tracing::error!(error_id = error_id, error = %e, "Database error");
            }
            AppError::Auth(AuthError::InvalidCredentials) => {
                tracing::warn!(error_id = error_id, "Invalid credentials attempt");
            }
            AppError::Auth(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Authentication error");
            }
            AppError::Internal(msg) => {
                tracing::error!(error_id = error_id, error = %msg, "Internal error");
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_id = uuid::Uuid::new_v4().to_string();
        self.log_error(&error_id);

        let (status, body) = <Self as ErrorHandler>::error_response(self, &error_id);
        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(e) => match e {
                DatabaseError::UniqueConstraintViolation(_) => StatusCode::BAD_REQUEST,
                DatabaseError::NotFound(_) => StatusCode::NOT_FOUND,
                DatabaseError::ConnectionPool(_) => StatusCode::SERVICE_UNAVAILABLE,
                DatabaseError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Auth(e) => e.status_code(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Shorthand for the 404 of a missing row
pub fn not_found(resource: &'static str) -> AppError {
    AppError::Database(DatabaseError::NotFound(resource))
}

// ============================================================================
// ERROR CONTEXT
// ============================================================================

/// Per-operation context carried through a handler for correlated logs
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            operation: operation.into(),
        }
    }

    pub fn log_error(&self, error: &AppError) {
        tracing::warn!(
            request_id = %self.request_id,
            operation = %self.operation,
            error = %error,
            "Operation failed"
        );
    }
}
