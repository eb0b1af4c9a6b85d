//! The codemods themselves.
//!
//! Every transform takes one file and returns its new text. A transform that
//! finds nothing to change returns the input unchanged, byte for byte.
//!
//! # Example
//!
//! ```
//! use codemods::config::TransformOptions;
//! use codemods::syntax::{FileInfo, SourceParser};
//! use codemods::transforms::TransformKind;
//!
//! let mut parser = SourceParser::new().unwrap();
//! let transform = "var-to-let".parse::<TransformKind>().unwrap().transform();
//! let file = FileInfo::new("index.js", "var a = 1;\n");
//!
//! let output = transform
//!     .transform(&file, &mut parser, &TransformOptions::default())
//!     .unwrap();
//! assert_eq!(output, "let a = 1;\n");
//! ```

pub mod async_error_handling;
pub mod extract_strings;
pub mod remove_console_log;
pub mod remove_unused_imports;
pub mod var_to_let;

use std::fmt;
use std::str::FromStr;

pub use async_error_handling::AddAsyncErrorHandling;
pub use extract_strings::{extract_strings, ExtractStrings, ExtractedString};
pub use remove_console_log::RemoveConsoleLog;
pub use remove_unused_imports::RemoveUnusedImports;
pub use var_to_let::VarToLet;

use crate::config::TransformOptions;
use crate::error::{CodemodError, CodemodResult};
use crate::syntax::{FileInfo, SourceParser};

/// A single-purpose source-to-source transform.
pub trait Transform {
    /// Name used on the command line.
    fn name(&self) -> &'static str;

    /// One-line summary for `codemods list`.
    fn description(&self) -> &'static str;

    /// Transform one file, returning its new source text.
    fn transform(
        &self,
        file: &FileInfo,
        parser: &mut SourceParser,
        options: &TransformOptions,
    ) -> CodemodResult<String>;
}

/// Registered transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    RemoveUnusedImports,
    RemoveConsoleLog,
    VarToLet,
    AddAsyncErrorHandling,
    ExtractStrings,
}

impl TransformKind {
    /// All transforms, in the order `codemods list` shows them.
    pub const ALL: [TransformKind; 5] = [
        TransformKind::RemoveUnusedImports,
        TransformKind::RemoveConsoleLog,
        TransformKind::VarToLet,
        TransformKind::AddAsyncErrorHandling,
        TransformKind::ExtractStrings,
    ];

    /// Instantiate the transform.
    pub fn transform(&self) -> Box<dyn Transform> {
        match self {
            TransformKind::RemoveUnusedImports => Box::new(RemoveUnusedImports),
            TransformKind::RemoveConsoleLog => Box::new(RemoveConsoleLog),
            TransformKind::VarToLet => Box::new(VarToLet),
            TransformKind::AddAsyncErrorHandling => Box::new(AddAsyncErrorHandling),
            TransformKind::ExtractStrings => Box::new(ExtractStrings),
        }
    }

    /// Command-line name of the transform.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::RemoveUnusedImports => "remove-unused-imports",
            TransformKind::RemoveConsoleLog => "remove-console-log",
            TransformKind::VarToLet => "var-to-let",
            TransformKind::AddAsyncErrorHandling => "add-async-error-handling",
            TransformKind::ExtractStrings => "extract-strings",
        }
    }
}

impl FromStr for TransformKind {
    type Err = CodemodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        TransformKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| CodemodError::UnknownTransform(s.to_string()))
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_kind_from_str() {
        assert_eq!(
            "remove-unused-imports".parse::<TransformKind>().unwrap(),
            TransformKind::RemoveUnusedImports
        );
        assert_eq!(
            "VAR_TO_LET".parse::<TransformKind>().unwrap(),
            TransformKind::VarToLet
        );
        assert!(matches!(
            "reformat".parse::<TransformKind>(),
            Err(CodemodError::UnknownTransform(name)) if name == "reformat"
        ));
    }

    #[test]
    fn test_names_match_instances() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.transform().name(), kind.name());
            assert_eq!(kind.to_string(), kind.name());
        }
    }
}
