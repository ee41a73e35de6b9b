use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use tracing::error;

use crate::response::ApiResponse;

/// Message returned to clients for every rejected credential check.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect credentials";

/// Message returned to clients for every rejected bearer token.
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.into())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl AppError {
    /// The message placed in the response envelope. Internal failures never
    /// expose their detail to the client.
    pub fn public_message(&self) -> String {
        match self {
            AppError::AuthError(AuthError::InvalidCredentials) => INCORRECT_CREDENTIALS.to_string(),
            AppError::AuthError(AuthError::Unauthenticated) => AUTHENTICATION_REQUIRED.to_string(),
            AppError::AuthError(AuthError::DuplicateEmail(message)) => message.clone(),
            AppError::ValidationError(message) => message.clone(),
            AppError::NotFound(message) => message.clone(),
            AppError::DatabaseError(_)
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => INTERNAL_ERROR.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        }
        HttpResponse::build(status).json(ApiResponse::failure(self.public_message()))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(e) => match e {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
                AuthError::DuplicateEmail(_) => StatusCode::CONFLICT,
            },
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Unauthenticated")]
    Unauthenticated,
}

/// Failures of token verification. Never shown to clients; the middleware
/// collapses all of them into [`AuthError::Unauthenticated`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(message) => AppError::InternalError(message),
            _ => AppError::AuthError(AuthError::Unauthenticated),
        }
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record: {0}")]
    Duplicate(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return DatabaseError::Duplicate(db_err.message().to_string());
            }
        }
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionError(err.to_string())
            }
            _ => DatabaseError::QueryError(err.to_string()),
        }
    }
}
