/// Error types shared by the de-duplication core and its entry points
use thiserror::Error;

use crate::tab_data::{TabId, WindowId};

/// A host (browser API) call that was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> HostError {
        HostError {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniqError {
    /// The tab snapshot could not be obtained; nothing was removed
    #[error("failed to query tabs of window {window_id}: {source}")]
    Query {
        window_id: WindowId,
        #[source]
        source: HostError,
    },

    /// A batch removal failed; earlier batches stay removed
    #[error("failed to remove tabs {ids:?}: {source}")]
    Removal {
        ids: Vec<TabId>,
        #[source]
        source: HostError,
    },

    #[error("failed to activate tab {tab_id}: {source}")]
    Refocus {
        tab_id: TabId,
        #[source]
        source: HostError,
    },

    #[error("failed to show notification: {source}")]
    Notification {
        #[source]
        source: HostError,
    },

    #[error("unknown key type: {0}")]
    UnknownKeyType(String),

    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl UniqError {
    /// Refocus and notification failures never stop a run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, UniqError::Refocus { .. } | UniqError::Notification { .. })
    }

    pub fn log(&self) {
        if self.is_fatal() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UniqError::Removal {
            ids: vec![3, 4],
            source: HostError::new("Invalid tab ID: 3"),
        };
        assert_eq!(err.to_string(), "failed to remove tabs [3, 4]: Invalid tab ID: 3");

        let err = UniqError::Query {
            window_id: 7,
            source: HostError::new("No window with id: 7"),
        };
        assert_eq!(err.to_string(), "failed to query tabs of window 7: No window with id: 7");
    }

    #[test]
    fn test_is_fatal() {
        let refocus = UniqError::Refocus {
            tab_id: 1,
            source: HostError::new("gone"),
        };
        assert!(!refocus.is_fatal());
        assert!(!UniqError::Notification { source: HostError::new("x") }.is_fatal());
        assert!(UniqError::UnknownKeyType("favicon".to_string()).is_fatal());
    }
}
