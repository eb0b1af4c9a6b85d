//! Error types shared by the syntax layer, the transforms and the runner.

use thiserror::Error;

/// Errors that can occur while parsing, transforming or printing a file.
#[derive(Error, Debug)]
pub enum CodemodError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse file: {path}")]
    ParseFailed { path: String },

    #[error("Syntax error in {path} at {line}:{column}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,

    #[error("Unknown transform: '{0}'")]
    UnknownTransform(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Overlapping edits at bytes {first_end} and {second_start}")]
    OverlappingEdits {
        first_end: usize,
        second_start: usize,
    },
}

/// Result type for codemod operations.
pub type CodemodResult<T> = Result<T, CodemodError>;
