//! Classification helpers

use super::error::{BatchError, TransportError};

impl BatchError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Rejected by the lifecycle rather than by the remote service
    pub fn is_not_started(&self) -> bool {
        matches!(self, BatchError::NotStarted)
    }

    /// Failure shared by a whole batch
    pub fn is_transport(&self) -> bool {
        matches!(self, BatchError::Transport(_))
    }

    /// Advisory only: the crate itself never retries
    pub fn is_retryable(&self) -> bool {
        match self {
            BatchError::IntakeFull { .. } => true,
            BatchError::Transport(err) => err.is_retryable(),
            _ => false,
        }
    }
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Http(_) => true,
            TransportError::Status { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }
}
