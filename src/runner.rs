//! Running a transform over files and directories.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::TransformOptions;
use crate::error::CodemodResult;
use crate::syntax::{Dialect, FileInfo, SourceParser};
use crate::transforms::Transform;

/// How the results of a run are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report changes without writing files.
    pub dry_run: bool,
    /// Write every transformed file's text to the output stream.
    pub print: bool,
}

/// Outcome of transforming one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Modified(String),
    Unchanged,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) processed: {} modified, {} unchanged, {} failed",
            self.processed, self.modified, self.unchanged, self.failed
        )
    }
}

/// Applies one transform to many files.
pub struct Runner {
    transform: Box<dyn Transform>,
    options: TransformOptions,
    run_options: RunOptions,
    parser: SourceParser,
}

impl Runner {
    pub fn new(
        transform: Box<dyn Transform>,
        options: TransformOptions,
        run_options: RunOptions,
    ) -> CodemodResult<Self> {
        Ok(Self {
            transform,
            options,
            run_options,
            parser: SourceParser::new()?,
        })
    }

    /// Transform every supported file under `paths`.
    ///
    /// A file that fails is logged and counted; the run continues with the
    /// next file. Only a failure to write to `out` aborts the run.
    pub fn run<W: Write>(&mut self, paths: &[PathBuf], out: &mut W) -> CodemodResult<RunSummary> {
        let mut summary = RunSummary::default();

        for path in collect_files(paths) {
            summary.processed += 1;
            match self.run_file(&path) {
                Ok(FileOutcome::Modified(output)) => {
                    summary.modified += 1;
                    if self.run_options.print {
                        out.write_all(output.as_bytes())?;
                    }
                }
                Ok(FileOutcome::Unchanged) => summary.unchanged += 1,
                Err(e) => {
                    summary.failed += 1;
                    log::error!("{}: {}", path.display(), e);
                }
            }
        }

        log::info!("{}: {}", self.transform.name(), summary);
        Ok(summary)
    }

    /// Transform a single file, writing it back unless this is a dry run.
    pub fn run_file(&mut self, path: &Path) -> CodemodResult<FileOutcome> {
        let file = FileInfo::read(path)?;
        let output = self
            .transform
            .transform(&file, &mut self.parser, &self.options)?;

        if output == file.source {
            log::debug!("{}: unchanged", path.display());
            return Ok(FileOutcome::Unchanged);
        }

        if self.run_options.dry_run {
            log::info!("[DRY-RUN] Would modify: {}", path.display());
        } else {
            fs::write(path, &output)?;
            log::info!("Modified: {}", path.display());
        }
        Ok(FileOutcome::Modified(output))
    }
}

/// Expand files and directories into the supported source files they hold.
///
/// Explicitly named files are kept whatever their extension, so an
/// unsupported file is reported as a failure rather than silently skipped.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in paths {
        if !root.is_dir() {
            files.push(root.clone());
            continue;
        }

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
        {
            let path = entry.path();
            if entry.file_type().is_file() && Dialect::from_path(path).is_some() {
                files.push(path.to_path_buf());
            }
        }
    }

    files
}

fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | ".next" | "coverage" | ".turbo"
    )
}
