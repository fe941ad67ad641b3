//! Shared error type across meas crates.

use thiserror::Error;

/// Stable error categories (one per failure class a caller can react to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A heap reservation failed; caller-held data was not consumed.
    Allocation,
    /// Caller broke an API contract (stale handle, bad argument, bad state).
    ContractViolation,
    /// Lookup or removal did not find the requested element.
    NotFound,
    /// The OS accounting or clock facility failed.
    ExternalResource,
    /// Configuration could not be parsed or failed validation.
    Config,
    /// Writing to an output sink failed.
    Io,
}

impl ErrorKind {
    /// String representation used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Allocation => "ALLOCATION",
            ErrorKind::ContractViolation => "CONTRACT_VIOLATION",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ExternalResource => "EXTERNAL_RESOURCE",
            ErrorKind::Config => "CONFIG",
            ErrorKind::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MeasError>;

/// Unified error type used by core and session.
#[derive(Debug, Error)]
pub enum MeasError {
    #[error("allocation failed: {0}")]
    AllocationFailed(String),
    #[error("contract violation: {0}")]
    ContractViolation(String),
    #[error("unknown handle: {0}")]
    UnknownHandle(String),
    #[error("not found")]
    NotFound,
    #[error("already stopped: {0}")]
    AlreadyStopped(String),
    #[error("resource query failed: {0}")]
    ResourceQuery(String),
    #[error("clock unavailable: {0}")]
    Clock(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl MeasError {
    /// Map an error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeasError::AllocationFailed(_) => ErrorKind::Allocation,
            MeasError::ContractViolation(_)
            | MeasError::UnknownHandle(_)
            | MeasError::AlreadyStopped(_) => ErrorKind::ContractViolation,
            MeasError::NotFound => ErrorKind::NotFound,
            MeasError::ResourceQuery(_) | MeasError::Clock(_) => ErrorKind::ExternalResource,
            MeasError::BadConfig(_) | MeasError::UnsupportedVersion => ErrorKind::Config,
            MeasError::Io(_) => ErrorKind::Io,
        }
    }
}
