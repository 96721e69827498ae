//! Error types for control plane operations
//!
//! Provides typed errors that library users can match and handle specifically.

use thiserror::Error;

use crate::variables::VarType;

/// Errors that can occur in the control plane
///
/// Malformed crop/aspect *values* are deliberately not represented here:
/// they are recovered locally inside the dispatcher (prior value retained, a
/// diagnostic logged, no command emitted), matching how a user typing a bad
/// ratio should be treated. This enum covers caller mistakes and snapshot
/// failures.
///
/// # Examples
///
/// ```
/// use vidplane_control::{command_channel, ControlConfig, ControlDispatcher, ControlError, VarId};
///
/// let (commands, _pipeline) = command_channel();
/// let dispatcher = ControlDispatcher::new(ControlConfig::default(), commands).unwrap();
///
/// match dispatcher.set_float(VarId::Fullscreen, 1.0) {
///     Err(ControlError::TypeMismatch { name, .. }) => {
///         eprintln!("{name} does not take a float");
///     }
///     other => panic!("expected a type mismatch, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ControlError {
    /// The provided configuration is invalid
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The variable name does not exist
    #[error("unknown control variable \"{0}\"")]
    UnknownVariable(String),

    /// The value's type does not match the variable's declared type
    #[error("variable \"{name}\" expects a {expected} value")]
    TypeMismatch {
        /// Variable that rejected the value
        name: &'static str,
        /// The declared type
        expected: VarType,
    },

    /// The variable only accepts its enumerated choices
    #[error("\"{value}\" is not an allowed choice for \"{name}\"")]
    ChoiceRejected {
        /// Variable that rejected the value
        name: &'static str,
        /// Rendering of the rejected value
        value: String,
    },

    /// No known filter chain accepts this module
    #[error("unable to find filter module \"{0}\"")]
    UnknownFilter(String),

    /// The frame grab did not complete within the configured bound
    ///
    /// Recovered locally: nothing is written and no file-name event is
    /// published.
    #[error("snapshot capture timed out")]
    CaptureTimeout,

    /// The frame grab failed outright
    #[error("snapshot capture failed: {0}")]
    Capture(String),

    /// Neither the configuration nor the writer provides a directory
    #[error("no path specified for snapshots")]
    NoSnapshotPath,

    /// The image writer collaborator could not produce the file
    #[error("snapshot could not be written: {0}")]
    SnapshotWrite(String),
}

/// Result type for control plane operations
///
/// This is a convenience alias for `Result<T, ControlError>`.
pub type Result<T> = std::result::Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ControlError::UnknownVariable("contrast".to_string());
        assert_eq!(err.to_string(), "unknown control variable \"contrast\"");

        let err = ControlError::TypeMismatch {
            name: "zoom",
            expected: VarType::Float,
        };
        assert_eq!(err.to_string(), "variable \"zoom\" expects a float value");

        let err = ControlError::NoSnapshotPath;
        assert_eq!(err.to_string(), "no path specified for snapshots");
    }
}
