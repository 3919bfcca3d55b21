//! Error types for scoring-sheet generation.
//!
//! All failures are terminal for the run: there are no retries anywhere in
//! this tool. Each error kind maps to a process exit code via
//! [`SheetError::exit_code`], keeping the codes the race committee's
//! existing scripts documented.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[cfg(windows)]
use windows_core as core;

/// Result type alias for scoring-sheet operations.
pub type Result<T, E = SheetError> = std::result::Result<T, E>;

/// Main error type for scoring-sheet generation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SheetError {
    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Sailwave version check failed: {reason}")]
    Version { reason: String },

    #[error("Failed to connect to Sailwave: {reason}")]
    Connection { reason: String },

    #[error("Timed out waiting for Sailwave reply after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Template render failed")]
    Render(#[from] tera::Error),

    #[error("{feature} is only available on {required_platform}")]
    UnsupportedPlatform { feature: String, required_platform: String },

    #[error("Windows API error: {operation}")]
    #[cfg(windows)]
    WindowsApi {
        operation: String,
        #[source]
        source: core::Error,
    },
}

impl SheetError {
    /// Process exit code for this failure kind.
    ///
    /// Live-mode failures keep the codes operators already know: 1 for a
    /// wrong/missing Sailwave version, 2 for launch/attach failure, 3 for
    /// listener window setup, 4 for a reply timeout. Everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            SheetError::Version { .. } => 1,
            SheetError::Connection { .. } => 2,
            #[cfg(windows)]
            SheetError::WindowsApi { .. } => 3,
            SheetError::Timeout { .. } => 4,
            _ => 1,
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        SheetError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        SheetError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for connection errors.
    pub fn connection_failed(reason: impl Into<String>) -> Self {
        SheetError::Connection { reason: reason.into() }
    }

    /// Helper constructor for version-gate failures.
    pub fn version_check_failed(reason: impl Into<String>) -> Self {
        SheetError::Version { reason: reason.into() }
    }

    /// Helper constructor for Windows API errors.
    #[cfg(windows)]
    pub fn windows_api_error(operation: impl Into<String>, source: core::Error) -> Self {
        SheetError::WindowsApi { operation: operation.into(), source }
    }

    /// Helper constructor for unsupported platform errors.
    pub fn unsupported_platform(
        feature: impl Into<String>,
        required_platform: impl Into<String>,
    ) -> Self {
        SheetError::UnsupportedPlatform {
            feature: feature.into(),
            required_platform: required_platform.into(),
        }
    }
}

impl From<std::io::Error> for SheetError {
    fn from(err: std::io::Error) -> Self {
        SheetError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_constructors_validation() {
        let file_error = SheetError::file_error(
            PathBuf::from("/test"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        );
        assert!(matches!(file_error, SheetError::File { .. }));

        let parse = SheetError::parse_error("competitor", "missing compboat");
        assert!(matches!(parse, SheetError::Parse { .. }));

        let conn = SheetError::connection_failed("Sailwave not running");
        assert!(matches!(conn, SheetError::Connection { .. }));
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: SheetError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<SheetError>();

        let error = SheetError::connection_failed("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn exit_codes_follow_documented_failure_kinds() {
        assert_eq!(SheetError::version_check_failed("old").exit_code(), 1);
        assert_eq!(SheetError::connection_failed("busy").exit_code(), 2);
        assert_eq!(SheetError::Timeout { duration: Duration::from_secs(9) }.exit_code(), 4);
        assert_eq!(SheetError::parse_error("xml", "bad").exit_code(), 1);
    }

    #[test]
    fn error_messages_contain_context() {
        let parse = SheetError::parse_error("competitor 3", "missing compsailno");
        let msg = parse.to_string();
        assert!(msg.contains("competitor 3"));
        assert!(msg.contains("missing compsailno"));

        let timeout = SheetError::Timeout { duration: Duration::from_secs(9) };
        assert!(timeout.to_string().contains("9s"));
    }

    #[test]
    fn from_io_error_maps_to_file_variant() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test file");
        let err: SheetError = io_err.into();
        match err {
            SheetError::File { source, .. } => assert_eq!(source.to_string(), "test file"),
            _ => panic!("Expected File error variant"),
        }
    }
}
