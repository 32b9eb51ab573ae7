//! Unified error handling for droidpull
//!
//! This module defines domain-specific error types that provide better
//! context and debugging information than generic `anyhow::Error`.

use std::io;
use thiserror::Error;

/// Main error type for ADB bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Device refused or ignored an `adb connect`
    #[error("Connection to {device} refused: {output}")]
    ConnectionRefused { device: String, output: String },

    /// Remote path does not exist on the device
    #[error("Remote path '{0}' does not exist")]
    PathNotFound(String),

    /// `adb pull` reported something other than success
    #[error("Pull of '{path}' failed: {output}")]
    PullFailed { path: String, output: String },

    /// The bridge executable could not be spawned
    #[error("Failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Local filesystem error while preparing the export location
    #[error("Local I/O error for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Generic error for cases not covered above
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

impl BridgeError {
    /// Check if this error means the device was never reachable
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            BridgeError::ConnectionRefused { .. } | BridgeError::Spawn { .. }
        )
    }

    /// Check if this error only affects a single resource category
    pub fn is_category_error(&self) -> bool {
        matches!(
            self,
            BridgeError::PathNotFound(_) | BridgeError::PullFailed { .. }
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            BridgeError::ConnectionRefused { device, .. } => format!(
                "Could not connect to {device}. Check that the emulator or device is running \
                 and that the address is correct."
            ),
            BridgeError::Spawn { tool, .. } => {
                format!("Could not run '{tool}'. Check that it is installed and on PATH.")
            }
            _ => self.to_string(),
        }
    }

    pub fn from_io_error(path: impl Into<String>, error: io::Error) -> Self {
        BridgeError::Io {
            path: path.into(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BridgeError::PathNotFound("/data/data/com.example/".to_string());
        assert_eq!(
            err.to_string(),
            "Remote path '/data/data/com.example/' does not exist"
        );
    }

    #[test]
    fn test_is_connection_error() {
        let err = BridgeError::ConnectionRefused {
            device: "127.0.0.1:7555".to_string(),
            output: "cannot connect".to_string(),
        };
        assert!(err.is_connection_error());

        let err = BridgeError::PathNotFound("/sdcard/x".to_string());
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_is_category_error() {
        let err = BridgeError::PullFailed {
            path: "/sdcard/x".to_string(),
            output: "adb: error".to_string(),
        };
        assert!(err.is_category_error());

        let err = BridgeError::Spawn {
            tool: "adb".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(!err.is_category_error());
    }

    #[test]
    fn test_user_message() {
        let err = BridgeError::ConnectionRefused {
            device: "127.0.0.1:7555".to_string(),
            output: "failed to connect".to_string(),
        };
        assert!(err.user_message().contains("127.0.0.1:7555"));

        let err = BridgeError::Spawn {
            tool: "adb".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.user_message().contains("PATH"));
    }
}
