//! Error types for overlay display operations
//!
//! Provides typed errors that library users can match and handle specifically.

use thiserror::Error;

/// Errors that can occur while bringing up or driving the overlay display
///
/// All fallible operations in this crate return `Result<T, RingError>`.
/// Steady-state driver conditions (a buffer not being ready to queue or
/// dequeue) are *not* errors and are reported through
/// [`QueueAdvance`](crate::ring::QueueAdvance) / `Option` return values
/// instead.
///
/// # Examples
///
/// ```no_run
/// # use vidplane_ring::{OverlayDisplay, RingError};
/// # fn example(result: Result<OverlayDisplay, RingError>) {
/// match result {
///     Ok(display) => {
///         println!("overlay ready with {} buffers", display.ring().len());
///     }
///     Err(RingError::AlreadyRunning) => {
///         eprintln!("another overlay display owns the hardware");
///     }
///     Err(e) => {
///         eprintln!("overlay start failed: {}", e);
///     }
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum RingError {
    /// Invalid configuration or driver-reported geometry
    ///
    /// Fatal to initialization: the overlay reported a non-positive buffer
    /// count, a buffer without a mapping, or the supplied configuration
    /// failed validation. The display does not start.
    #[error("invalid overlay configuration: {0}")]
    Config(String),

    /// The reusable frame object could not be constructed
    ///
    /// Propagated from the picture allocation collaborator. Fatal to the
    /// current presentation attempt; the display shuts down cleanly.
    #[error("picture allocation failed: {0}")]
    Allocation(String),

    /// The overlay driver refused an operation
    ///
    /// Only `create` failures surface through this variant; queue and
    /// dequeue report "not ready" as ordinary outcomes.
    #[error("overlay driver failure: {0}")]
    Driver(String),

    /// The native display surface could not be acquired
    #[error("display surface unavailable: {0}")]
    Surface(String),

    /// A second overlay display was opened while one is active
    ///
    /// Fatal to the new instantiation attempt only; the running instance
    /// is unaffected.
    #[error("cannot start more than one overlay display at a time")]
    AlreadyRunning,
}

/// Result type for overlay display operations
///
/// This is a convenience alias for `Result<T, RingError>`.
pub type Result<T> = std::result::Result<T, RingError>;

// Helper implementations for common error patterns
impl RingError {
    /// Create a configuration error
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a driver error
    pub(crate) fn driver(msg: impl Into<String>) -> Self {
        Self::Driver(msg.into())
    }

    /// Create a surface error
    pub(crate) fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RingError::AlreadyRunning;
        assert_eq!(
            err.to_string(),
            "cannot start more than one overlay display at a time"
        );

        let err = RingError::config("overlay reports 0 buffers");
        assert_eq!(
            err.to_string(),
            "invalid overlay configuration: overlay reports 0 buffers"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = RingError::driver("create refused");
        assert!(matches!(err, RingError::Driver(_)));

        let err = RingError::surface("window went away");
        assert!(matches!(err, RingError::Surface(_)));
    }
}
