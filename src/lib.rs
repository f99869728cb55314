//! codeinventory - structural inventory of multi-language source trees.
//!
//! codeinventory turns raw file bytes into typed, line-addressed code
//! elements (imports, classes, functions, methods, variables, packages and UI
//! components) and rolls the per-file results into one project summary.
//!
//! # Architecture
//!
//! - `classify`: language labels from paths, and the binary/text gate
//! - `analysis`: per-file extraction strategies, line resolution and metrics
//! - `summary`: project-wide aggregation
//! - `runner`: file discovery and parallel analysis of a whole tree
//! - `config`: YAML run configuration
//! - `report`: output formatting (pretty, JSON)
//!
//! # Example
//!
//! ```
//! use codeinventory::{analyze_file, summarize_project, ElementKind};
//!
//! let file = analyze_file("app.py", "import os\n\ndef main():\n    pass\n");
//! assert_eq!(file.language, "Python");
//! assert_eq!(file.functions, vec!["main"]);
//! assert_eq!(file.count_of(ElementKind::Import), 1);
//!
//! let summary = summarize_project(&[file]);
//! assert_eq!(summary.function_count, 1);
//! ```

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod report;
pub mod runner;
pub mod summary;

pub use analysis::{
    analyze_bytes, analyze_file, Element, ElementKind, Extraction, ExtractionStatus,
    FileAnalysis, Strategy,
};
pub use classify::{classify, is_binary, is_code_file, UNKNOWN};
pub use config::{Config, ConfigError};
pub use runner::{CancelToken, ProjectRun, RunError, Runner, SourceFile};
pub use summary::{summarize_project, ImportFrequency, ProjectSummary};
