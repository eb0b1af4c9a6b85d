//! Options shared by all transforms.
//!
//! Options can be built in code, read from a JSON file, or both: the CLI
//! loads the file (if any) and extends it with its own flags.
//!
//! ```json
//! {
//!   "exempt_names": ["React", "h"],
//!   "console_methods": ["log", "debug"]
//! }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodemodResult;

/// Binding names that remove-unused-imports never prunes by default.
pub const DEFAULT_EXEMPT_NAMES: &[&str] = &["React"];

/// `console` methods that remove-console-log strips by default.
pub const DEFAULT_CONSOLE_METHODS: &[&str] = &["log"];

/// Options passed to every transform invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransformOptions {
    /// Import bindings that must never be removed, even when unused.
    pub exempt_names: BTreeSet<String>,

    /// `console` methods whose calls are removed.
    pub console_methods: BTreeSet<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            exempt_names: DEFAULT_EXEMPT_NAMES.iter().map(|s| s.to_string()).collect(),
            console_methods: DEFAULT_CONSOLE_METHODS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TransformOptions {
    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(content: &str) -> CodemodResult<Self> {
        let options: TransformOptions = serde_json::from_str(content)?;
        Ok(options)
    }

    /// Read options from a JSON file.
    pub fn from_file(path: &Path) -> CodemodResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Add names to the exemption set.
    pub fn with_exempt_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add methods to the set of stripped `console` methods.
    pub fn with_console_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.console_methods
            .extend(methods.into_iter().map(Into::into));
        self
    }

    /// Returns true if a binding with this name must be kept regardless of use.
    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt_names.contains(name)
    }

    /// Returns true if calls to `console.<method>` should be stripped.
    pub fn strips_console_method(&self, method: &str) -> bool {
        self.console_methods.contains(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodemodError;

    #[test]
    fn test_defaults() {
        let options = TransformOptions::default();
        assert!(options.is_exempt("React"));
        assert!(!options.is_exempt("useState"));
        assert!(options.strips_console_method("log"));
        assert!(!options.strips_console_method("error"));
    }

    #[test]
    fn test_from_json_partial() {
        let options = TransformOptions::from_json(r#"{"console_methods": ["debug"]}"#).unwrap();
        assert!(options.strips_console_method("debug"));
        assert!(!options.strips_console_method("log"));
        // Unspecified fields keep their defaults
        assert!(options.is_exempt("React"));
    }

    #[test]
    fn test_from_json_empty_exemptions() {
        let options = TransformOptions::from_json(r#"{"exempt_names": []}"#).unwrap();
        assert!(!options.is_exempt("React"));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = TransformOptions::from_json("{ not json");
        assert!(matches!(result, Err(CodemodError::Config(_))));
    }

    #[test]
    fn test_builders_extend() {
        let options = TransformOptions::default()
            .with_exempt_names(["h"])
            .with_console_methods(vec!["info".to_string()]);
        assert!(options.is_exempt("React"));
        assert!(options.is_exempt("h"));
        assert!(options.strips_console_method("log"));
        assert!(options.strips_console_method("info"));
    }
}
