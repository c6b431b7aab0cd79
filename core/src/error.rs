#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! All variants describe programmer/configuration mistakes in the
//! resource metadata: extraction is pure validation, so every error is
//! synchronous, fail-fast and non-retryable. Definition-level messages
//! embed the `Class.method(Type name, ...)` signature of the offending
//! handler so a mistake is diagnosable without a debugger.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (metadata file loading).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// An unknown or absent class was supplied to extraction.
    #[from(ignore)]
    #[display("Missing class: {_0}")]
    MissingClass(String),

    /// A method-bearing definition resolved to no route path.
    #[from(ignore)]
    #[display("Missing route path: {_0}")]
    MissingPath(String),

    /// A parameter could not be classified and the HTTP method does not
    /// permit an implicit body parameter.
    #[from(ignore)]
    #[display("Unbound parameter: {_0}")]
    UnboundParameter(String),

    /// More than one parameter resolved to the request body for the
    /// same operation.
    #[from(ignore)]
    #[display("Ambiguous body parameter: {_0}")]
    AmbiguousBodyParameter(String),

    /// Generic structural/configuration errors (malformed metadata
    /// documents, conflicting verb annotations, duplicate routes).
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General, not one of the named kinds
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_named_kinds_render_prefix() {
        let err = AppError::AmbiguousBodyParameter("a.b(Dummy json)".into());
        assert_eq!(
            format!("{}", err),
            "Ambiguous body parameter: a.b(Dummy json)"
        );

        let err = AppError::MissingPath("a.b()".into());
        assert_eq!(format!("{}", err), "Missing route path: a.b()");
    }
}
