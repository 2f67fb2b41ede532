//! Unified error handling for cozmonaut.
//!
//! Dispatch and service lifecycle errors live here. Collaborator errors
//! (registry, device, config) are defined next to their traits and converted
//! into exit statuses by the operations that use them.

use crate::status::ExitStatus;
use thiserror::Error;

// ============================================================================
// Dispatch Errors
// ============================================================================

/// Errors raised by the dispatcher before any operation is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

impl DispatchError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownOperation(_) => "unknown_operation",
        }
    }

    /// Exit status the process reports for this error.
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::UnknownOperation(_) => ExitStatus::USAGE,
        }
    }
}

// ============================================================================
// Service Errors
// ============================================================================

/// Service lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("service \"{0}\" is already loaded")]
    AlreadyLoaded(String),

    #[error("service \"{0}\" is not loaded")]
    NotLoaded(String),

    #[error("service \"{0}\" is not ready")]
    NotReady(String),

    #[error("service \"{0}\" is not started")]
    NotStarted(String),

    #[error("service \"{0}\" is not running")]
    NotRunning(String),

    #[error("connection {0} is not open")]
    UnknownConnection(u64),

    #[error("connection {0} is closed")]
    ConnectionClosed(u64),

    #[error("connection {0} is backlogged")]
    Backlogged(u64),
}

impl ServiceError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyLoaded(_) => "already_loaded",
            Self::NotLoaded(_) => "not_loaded",
            Self::NotReady(_) => "not_ready",
            Self::NotStarted(_) => "not_started",
            Self::NotRunning(_) => "not_running",
            Self::UnknownConnection(_) => "unknown_connection",
            Self::ConnectionClosed(_) => "connection_closed",
            Self::Backlogged(_) => "backlogged",
        }
    }
}
