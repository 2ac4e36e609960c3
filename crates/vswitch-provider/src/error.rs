//! Provider error types.
//!
//! Every lifecycle failure is reported as a [`VSwitchError`] carrying the
//! operation and, when known, the vSwitch id, so the message alone is enough
//! to act on.

use crate::mapper::MappingError;
use robot_client::RobotError;
use std::fmt;
use thiserror::Error;

/// Lifecycle operation an error occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
    Reconcile,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
            Operation::Reconcile => "reconcile",
        };
        f.write_str(name)
    }
}

/// Where an error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorContext {
    pub operation: Operation,
    pub vswitch_id: Option<u64>,
}

impl ErrorContext {
    pub fn new(operation: Operation, vswitch_id: Option<u64>) -> Self {
        Self { operation, vswitch_id }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vswitch_id {
            Some(id) => write!(f, "{} vSwitch {}", self.operation, id),
            None => write!(f, "{} vSwitch", self.operation),
        }
    }
}

/// Error discriminant, for callers that branch on the kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    RemoteRejected,
    TransportFailure,
    MalformedResponse,
    InvalidInput,
    InvalidConfig,
}

/// Errors that can occur while managing a vSwitch.
#[derive(Debug, Error)]
pub enum VSwitchError {
    /// The addressed vSwitch does not exist remotely
    #[error("{context}: not found: {message}")]
    NotFound { context: ErrorContext, message: String },

    /// The Robot service refused the request (invalid input, VLAN collision, cancellation in process)
    #[error("{context}: rejected by Robot ({status} {code}): {message}")]
    RemoteRejected {
        context: ErrorContext,
        status: u16,
        code: String,
        message: String,
    },

    /// Network, authentication or transient service failure
    #[error("{context}: transport failure: {source}")]
    TransportFailure {
        context: ErrorContext,
        #[source]
        source: RobotError,
    },

    /// The remote representation could not be turned into a record
    #[error("{context}: malformed response: {reason}")]
    MalformedResponse { context: ErrorContext, reason: String },

    /// A caller-declared attribute is not well-formed; nothing was sent upstream
    #[error("{context}: invalid input: {reason}")]
    InvalidInput { context: ErrorContext, reason: String },

    /// Provider configuration is incomplete or unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl VSwitchError {
    /// Classify a gateway error
    pub fn from_robot(context: ErrorContext, error: RobotError) -> Self {
        match error {
            RobotError::NotFound(message) => VSwitchError::NotFound { context, message },
            RobotError::Rejected { status, code, message } => VSwitchError::RemoteRejected {
                context,
                status,
                code,
                message,
            },
            RobotError::Serialization(e) => VSwitchError::MalformedResponse {
                context,
                reason: e.to_string(),
            },
            source @ (RobotError::Http(_) | RobotError::Authentication(_) | RobotError::Unavailable { .. }) => {
                VSwitchError::TransportFailure { context, source }
            }
        }
    }

    pub fn malformed(context: ErrorContext, error: MappingError) -> Self {
        VSwitchError::MalformedResponse {
            context,
            reason: error.to_string(),
        }
    }

    pub fn invalid_input(context: ErrorContext, reason: impl fmt::Display) -> Self {
        VSwitchError::InvalidInput {
            context,
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VSwitchError::NotFound { .. } => ErrorKind::NotFound,
            VSwitchError::RemoteRejected { .. } => ErrorKind::RemoteRejected,
            VSwitchError::TransportFailure { .. } => ErrorKind::TransportFailure,
            VSwitchError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            VSwitchError::InvalidInput { .. } => ErrorKind::InvalidInput,
            VSwitchError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Operation and id the error belongs to (absent for configuration errors)
    pub fn context(&self) -> Option<ErrorContext> {
        match self {
            VSwitchError::NotFound { context, .. }
            | VSwitchError::RemoteRejected { context, .. }
            | VSwitchError::TransportFailure { context, .. }
            | VSwitchError::MalformedResponse { context, .. }
            | VSwitchError::InvalidInput { context, .. } => Some(*context),
            VSwitchError::InvalidConfig(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Only transport failures may succeed when repeated unchanged.
    ///
    /// A create that failed this way may still have happened remotely; callers
    /// must look for the entity before issuing the create again.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::TransportFailure
    }
}
