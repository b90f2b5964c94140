//! Core error types for the Folio backend.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio backend.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors raised by the auth backends.
///
/// Both the local backend and the delegated (Supabase) backend translate
/// their failures into this taxonomy so callers never see provider-specific
/// error shapes.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT secret is not configured")]
    MissingJwtSecret,

    #[error("Signup failed: {0}")]
    SignupFailed(String),

    #[error("Signup succeeded but no access token was returned (email confirmation may be enabled)")]
    EmailConfirmationRequired,

    #[error("No access token returned by the auth provider")]
    NoAccessToken,

    #[error("Token invalid after authentication")]
    TokenInvalid,

    #[error("Could not fetch user from the auth provider")]
    UserFetchFailed,

    #[error("Auth provider unreachable: {0}")]
    ProviderUnreachable(String),

    #[error("Missing auth provider configuration: {0}")]
    MissingProviderConfig(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' is out of range: {detail}")]
    OutOfRange { field: String, detail: String },
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
