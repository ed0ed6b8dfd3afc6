//! Error types for the desktop shell
//!
//! Lookup failures never escape to the page: public shell operations log a
//! warning and return, per the framework's no-fatal-errors rule. These
//! types exist for the internal seams where a caller can act on the
//! failure.

use jaffolding_core::WindowId;

/// Errors that can occur in desktop operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopError {
    /// Window with the given ID was not found
    WindowNotFound(WindowId),

    /// No app registered under the given id
    AppNotFound(String),

    /// No dock entry exists for the given app id
    DockEntryNotFound(String),

    /// An operation was attempted that is not valid in the current state
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },
}

impl std::fmt::Display for DesktopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowNotFound(id) => write!(f, "window not found: {}", id),
            Self::AppNotFound(id) => write!(f, "app not found: {}", id),
            Self::DockEntryNotFound(id) => write!(f, "dock entry not found: {}", id),
            Self::InvalidOperation { op, reason } => {
                write!(f, "invalid operation '{}': {}", op, reason)
            }
        }
    }
}

impl std::error::Error for DesktopError {}

/// Result type alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DesktopError::WindowNotFound(42).to_string(),
            "window not found: 42"
        );
        assert_eq!(
            DesktopError::AppNotFound("calculator".into()).to_string(),
            "app not found: calculator"
        );
        assert_eq!(
            DesktopError::InvalidOperation {
                op: "start_drag",
                reason: "window is maximized",
            }
            .to_string(),
            "invalid operation 'start_drag': window is maximized"
        );
    }
}
