//! Custom error types for the URL shortener application.
//!
//! Every failure a request can hit is handled locally by turning it into a
//! user-facing JSON error response; none of them are fatal to the process.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ErrorResponse;

/// Application-level errors
#[derive(Debug)]
pub enum AppError {
    /// Unknown short code or route
    NotFound(String),
    /// Action requires a logged-in user
    Unauthenticated(String),
    /// Logged in (or anonymous) but not the owner of the resource
    Unauthorized(String),
    /// Invalid input data
    ValidationError(String),
    /// Email or password missing from a credentials form
    MissingCredentials(String),
    /// Email already registered
    EmailAlreadyExists(String),
    /// Login failed; deliberately vague about which half was wrong
    InvalidCredentials(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::MissingCredentials(msg) => write!(f, "Missing credentials: {}", msg),
            AppError::EmailAlreadyExists(msg) => write!(f, "Email already exists: {}", msg),
            AppError::InvalidCredentials(msg) => write!(f, "Invalid credentials: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// ============================================================================
// Constructor Methods
// ============================================================================

impl AppError {
    /// Create a NotFound error for a short code
    pub fn url_not_found(short_code: &str) -> Self {
        AppError::NotFound(format!("URL with code '{}' not found", short_code))
    }

    /// Create an Unauthenticated error asking the caller to log in
    pub fn login_required(action: &str) -> Self {
        AppError::Unauthenticated(format!("Please log in or register to {}", action))
    }

    /// Create an Unauthorized error for a resource ownership violation
    pub fn not_owner(short_code: &str) -> Self {
        AppError::Unauthorized(format!("You do not own the URL '{}'", short_code))
    }

    /// Create the single error returned for every failed login
    pub fn invalid_credentials() -> Self {
        AppError::InvalidCredentials("Email or password is incorrect".into())
    }

    /// Create an EmailAlreadyExists error
    pub fn email_taken(email: &str) -> Self {
        AppError::EmailAlreadyExists(format!("Email '{}' is already registered", email))
    }

    /// Create a MissingCredentials error
    pub fn missing_credentials() -> Self {
        AppError::MissingCredentials("Email and password are both required".into())
    }

    /// Create a ValidationError with a message
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError(message.into())
    }

    /// Create an InternalError with a message
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::InternalError(message.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::MissingCredentials(_) => StatusCode::FORBIDDEN,
            AppError::EmailAlreadyExists(_) => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials(_) => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::Unauthenticated(msg) => ("UNAUTHENTICATED", msg.clone()),
            AppError::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            AppError::ValidationError(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::MissingCredentials(msg) => ("MISSING_CREDENTIALS", msg.clone()),
            AppError::EmailAlreadyExists(msg) => ("EMAIL_ALREADY_EXISTS", msg.clone()),
            AppError::InvalidCredentials(msg) => ("INVALID_CREDENTIALS", msg.clone()),
            AppError::InternalError(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(message, error_code))
    }
}
