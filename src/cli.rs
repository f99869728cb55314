//! Command-line interface for codeinventory.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::config::{self, Config};
use crate::report::{self, Format};
use crate::runner::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Structural inventory of source trees.
///
/// codeinventory walks a project, classifies each file by language and
/// extracts its imports, classes, functions, methods and variables, then
/// summarizes the whole project.
#[derive(Parser)]
#[command(name = "codeinventory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project directory or a single file
    #[command(visible_alias = "scan")]
    Analyze(AnalyzeArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Number of worker threads
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List every element of every file in pretty output
    #[arg(long)]
    pub elements: bool,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "codeinventory.yaml")]
    pub output: PathBuf,
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    let format = match Format::parse(&args.format) {
        Some(f) => f,
        None => {
            eprintln!(
                "Error: invalid format {:?}, must be 'pretty' or 'json'",
                args.format
            );
            return Ok(EXIT_ERROR);
        }
    };

    // Load config, CLI flags win
    let cwd = std::env::current_dir()?;
    let mut config = match Config::load(args.config.as_deref(), &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(jobs) = args.jobs {
        config.jobs = Some(jobs);
    }

    let runner = Runner::new(config);
    let files = match runner.collect_files(&args.path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if files.is_empty() {
        eprintln!("Warning: no files to analyze");
    }

    let progress = progress_bar(files.len(), args.no_progress || files.len() < 2);
    let tick = progress.clone();
    let runner = runner.on_progress(move |_| tick.inc(1));
    let run = runner.analyze(&files);
    progress.finish_and_clear();
    let run = match run {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Output results
    let path_str = args.path.to_string_lossy().to_string();
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            colored::control::set_override(false);
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(io::stdout().lock()),
    };

    match format {
        Format::Json => report::write_json(&mut out, &run)?,
        Format::Pretty => report::write_pretty(&mut out, &path_str, &run, args.elements)?,
    }
    out.flush()?;

    Ok(EXIT_SUCCESS)
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::with_draw_target(Some(len as u64), ProgressDrawTarget::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: codeinventory analyze . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
