// SPDX-License-Identifier: MPL-2.0
//! Error types.
//!
//! [`Error`] covers the host side (configuration, state files, replay traces).
//! The viewer core never fails fatally: [`LoadError`] becomes a user-facing
//! alert and [`ViewerError`] is only logged.

use std::io;
use thiserror::Error;

/// Crate-level error for I/O and file formats.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid trace: {0}")]
    Trace(String),

    #[error(transparent)]
    Load(#[from] LoadError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A document failed to load or parse.
///
/// Reported to the user as a blocking alert and logged with its detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("document could not be parsed: {0}")]
    Parse(String),

    #[error("document has no pages")]
    EmptyDocument,

    #[error("document could not be read: {0}")]
    Io(String),

    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),
}

impl LoadError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LoadError::Parse(_) => "error-load-parse",
            LoadError::EmptyDocument => "error-load-empty",
            LoadError::Io(_) => "error-load-io",
            LoadError::UnsupportedFormat(_) => "error-load-unsupported",
        }
    }

    /// Builds an error from a free-form engine message.
    pub fn from_message(msg: &str) -> Self {
        let lower = msg.to_lowercase();
        if lower.contains("no such file")
            || lower.contains("permission denied")
            || lower.contains("i/o error")
        {
            LoadError::Io(msg.to_string())
        } else if lower.contains("no pages") || lower.contains("empty") {
            LoadError::EmptyDocument
        } else if lower.contains("unsupported") || lower.contains("not a pdf") {
            LoadError::UnsupportedFormat(msg.to_string())
        } else {
            LoadError::Parse(msg.to_string())
        }
    }
}

/// Recoverable misuse of the viewer, logged and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("{operation} requested before the rendering engine was ready")]
    EngineNotReady { operation: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn load_error_is_transparent() {
        let err: Error = LoadError::EmptyDocument.into();
        assert_eq!(err.to_string(), "document has no pages");
    }

    #[test]
    fn from_message_categorizes() {
        assert!(matches!(
            LoadError::from_message("No such file or directory"),
            LoadError::Io(_)
        ));
        assert_eq!(
            LoadError::from_message("document has no pages"),
            LoadError::EmptyDocument
        );
        assert!(matches!(
            LoadError::from_message("Invalid PDF structure"),
            LoadError::Parse(_)
        ));
        assert!(matches!(
            LoadError::from_message("Unsupported file type: image/png"),
            LoadError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn each_variant_has_an_i18n_key() {
        let errors = [
            LoadError::Parse(String::new()),
            LoadError::EmptyDocument,
            LoadError::Io(String::new()),
            LoadError::UnsupportedFormat(String::new()),
        ];
        for err in errors {
            assert!(err.i18n_key().starts_with("error-load-"));
        }
    }

    #[test]
    fn engine_not_ready_names_operation() {
        let err = ViewerError::EngineNotReady {
            operation: "search",
        };
        assert!(err.to_string().starts_with("search"));
    }
}
