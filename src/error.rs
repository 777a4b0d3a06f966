//! Error types for page-harness.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use page_harness::{PageObject, Result};
//!
//! async fn example(page: &PageObject) -> Result<()> {
//!     page.wait_for_elements(&["header"], None, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Waiting | [`Error::Timeout`] |
//! | Selectors | [`Error::UnknownSelector`] |
//! | Capture | [`Error::Capture`] |
//! | Adapter | [`Error::Adapter`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Waiting Errors
    // ========================================================================
    /// Wait predicate never became true within the budget.
    ///
    /// Fatal to the caller; this crate never retries a timed-out wait.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the condition that was waited on.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Selector Errors
    // ========================================================================
    /// Selector name is not present in the selector table.
    ///
    /// Raised at load-selector registration and at every table lookup;
    /// a missing name never silently resolves to "absent element".
    #[error("Unknown selector: {name}")]
    UnknownSelector {
        /// The missing selector name.
        name: String,
    },

    // ========================================================================
    // Capture Errors
    // ========================================================================
    /// Screenshot composition failed.
    ///
    /// Covers both image decode and file write failures; the composer
    /// surfaces them through this one variant without distinguishing them.
    #[error("Capture failed: {message}")]
    Capture {
        /// Description of the decode or write failure.
        message: String,
    },

    // ========================================================================
    // Adapter Errors
    // ========================================================================
    /// The driver adapter reported a failure.
    ///
    /// Returned when a presence query, element lookup, or raw screenshot
    /// capture fails inside the injected adapter.
    #[error("Adapter error: {message}")]
    Adapter {
        /// Description of the adapter failure.
        message: String,
    },
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates an unknown selector error.
    #[inline]
    pub fn unknown_selector(name: impl Into<String>) -> Self {
        Self::UnknownSelector { name: name.into() }
    }

    /// Creates a capture error.
    #[inline]
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }

    /// Creates an adapter error.
    #[inline]
    pub fn adapter(message: impl Into<String>) -> Self {
        Self::Adapter {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a capture error.
    #[inline]
    #[must_use]
    pub fn is_capture_error(&self) -> bool {
        matches!(self, Self::Capture { .. })
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed if the caller retries the whole
    /// operation; retry policy belongs to the caller, not this crate.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Adapter { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = Error::timeout("elements present: [\"header\"]", 10_000);
        assert_eq!(
            err.to_string(),
            "Timeout after 10000ms: elements present: [\"header\"]"
        );
    }

    #[test]
    fn test_unknown_selector_display() {
        let err = Error::unknown_selector("footer");
        assert_eq!(err.to_string(), "Unknown selector: footer");
    }

    #[test]
    fn test_capture_display() {
        let err = Error::capture("bad png header");
        assert_eq!(err.to_string(), "Capture failed: bad png header");
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::timeout("loaded", 500);
        let other_err = Error::unknown_selector("body");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_capture_error() {
        let capture_err = Error::capture("disk full");
        let other_err = Error::timeout("loaded", 500);

        assert!(capture_err.is_capture_error());
        assert!(!other_err.is_capture_error());
    }

    #[test]
    fn test_is_recoverable() {
        let timeout_err = Error::timeout("loaded", 500);
        let adapter_err = Error::adapter("session gone");
        let selector_err = Error::unknown_selector("body");

        assert!(timeout_err.is_recoverable());
        assert!(adapter_err.is_recoverable());
        assert!(!selector_err.is_recoverable());
    }
}
