use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use codemods::runner::collect_files;
use codemods::syntax::{FileInfo, SourceParser};
use codemods::transforms::{extract_strings, ExtractedString};
use codemods::{RunOptions, Runner, TransformKind, TransformOptions};

#[derive(Parser)]
#[command(name = "codemods")]
#[command(version)]
#[command(about = "Source-to-source transforms for JavaScript and TypeScript", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a transform over files or directories
    Run {
        /// Transform to run (see `codemods list`)
        transform: TransformKind,

        /// Files or directories to transform
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Print transformed files to stdout
        #[arg(long)]
        print: bool,

        /// Import name that is never removed (repeatable)
        #[arg(long = "exempt", value_name = "NAME")]
        exempt: Vec<String>,

        /// console method to strip (repeatable)
        #[arg(long = "console-method", value_name = "NAME")]
        console_methods: Vec<String>,

        /// JSON file with transform options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List available transforms
    List,
    /// Print the string literals of files as JSON
    Strings {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(serde::Serialize)]
struct FileStrings {
    path: String,
    strings: Vec<ExtractedString>,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            transform,
            paths,
            dry_run,
            print,
            exempt,
            console_methods,
            config,
        } => {
            let mut options = match &config {
                Some(path) => TransformOptions::from_file(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => TransformOptions::default(),
            };
            options = options
                .with_exempt_names(exempt)
                .with_console_methods(console_methods);

            let mut runner = Runner::new(
                transform.transform(),
                options,
                RunOptions { dry_run, print },
            )
            .context("Failed to initialize parser")?;

            let summary = runner
                .run(&paths, &mut io::stdout().lock())
                .context("Failed to write output")?;
            eprintln!("{}", summary);

            if summary.has_failures() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::List => {
            for kind in TransformKind::ALL {
                println!("{:<26} {}", kind.name(), kind.transform().description());
            }
        }
        Commands::Strings { paths } => {
            let mut parser = SourceParser::new().context("Failed to initialize parser")?;
            let mut results = Vec::new();
            let mut failed = false;

            for path in collect_files(&paths) {
                let parsed = FileInfo::read(&path).and_then(|file| parser.parse(&file));
                match parsed {
                    Ok(tree) => results.push(FileStrings {
                        path: path.display().to_string(),
                        strings: extract_strings(&tree),
                    }),
                    Err(e) => {
                        log::error!("{}: {}", path.display(), e);
                        failed = true;
                    }
                }
            }

            println!("{}", serde_json::to_string_pretty(&results)?);
            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
