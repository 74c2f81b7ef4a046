//! Error classification shared by every bounded context.
//!
//! Each service defines its own `thiserror` enum. Adapters that surface
//! failures to users only need the coarse [`ErrorKind`] and the matching
//! [`StatusClass`], which [`Classify`] provides uniformly.

use serde::Serialize;
use std::fmt;

/// Coarse failure taxonomy for core operations.
///
/// Validation and authorization failures are detected before any mutation.
/// Not-found failures abort the operation when they concern the primary
/// entity. Storage failures carry the underlying store's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// The principal lacks the capability or sent a disallowed patch shape.
    Authorization,
    /// The referenced entity is absent or not owned by the caller.
    NotFound,
    /// The underlying store failed.
    Storage,
}

impl ErrorKind {
    /// Returns the user-facing status class for this kind.
    #[must_use]
    pub const fn status_class(self) -> StatusClass {
        match self {
            Self::Validation => StatusClass::BadRequest,
            Self::Authorization => StatusClass::Forbidden,
            Self::NotFound => StatusClass::NotFound,
            Self::Storage => StatusClass::Internal,
        }
    }
}

/// User-facing status class an adapter maps onto its transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// The request was malformed.
    BadRequest,
    /// The caller may not perform the request.
    Forbidden,
    /// The target does not exist.
    NotFound,
    /// The server failed.
    Internal,
}

impl StatusClass {
    /// Returns the conventional HTTP status code for the class.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BadRequest => "bad request",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Internal => "internal error",
        };
        f.write_str(label)
    }
}

/// Maps a service error onto the shared taxonomy.
pub trait Classify: std::error::Error {
    /// Returns the failure kind.
    fn kind(&self) -> ErrorKind;

    /// Returns the user-facing status class.
    fn status_class(&self) -> StatusClass {
        self.kind().status_class()
    }
}

/// Status and message pair handed to the adapter layer.
///
/// The message is the error's display text verbatim. Storage failures
/// therefore expose the raw driver message to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// User-facing status class.
    pub status: StatusClass,
    /// Human-readable message.
    pub message: String,
}

impl ErrorReport {
    /// Builds a report from any classified error.
    #[must_use]
    pub fn from_error(err: &impl Classify) -> Self {
        Self {
            status: err.status_class(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}
