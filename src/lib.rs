//! Codemods - source-to-source transforms for JavaScript and TypeScript
//!
//! This crate parses JavaScript, JSX, TypeScript and TSX with tree-sitter and
//! rewrites files by splicing edits into the original text, so untouched code
//! keeps its exact formatting. The main transform removes unused imports;
//! a few smaller cleanups ship alongside it.

pub mod config;
pub mod error;
pub mod runner;
pub mod syntax;
pub mod transforms;

pub use config::TransformOptions;
pub use error::{CodemodError, CodemodResult};
pub use runner::{Runner, RunOptions, RunSummary};
pub use transforms::{Transform, TransformKind};
