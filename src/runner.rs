//! Project runner: discovery, gating, parallel analysis and aggregation.
//!
//! Files are analyzed on a dedicated rayon pool. Each task only produces its
//! own [`FileAnalysis`]; the summary is built after the pool has joined, from
//! the path-sorted file list.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use globset::GlobSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::analysis::{analyze_bytes, FileAnalysis};
use crate::classify;
use crate::config::{Config, ConfigError};
use crate::summary::{summarize_project, ProjectSummary};

/// Errors that abort a project run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("run was cancelled")]
    Cancelled,
}

/// Shared cancellation flag.
///
/// Cloning shares the flag; cancelling any clone cancels the run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Location on disk.
    pub abs_path: PathBuf,
    /// `/`-separated path relative to the run root.
    pub rel_path: String,
}

/// Everything one run produces; serialized as `{"files": [...], "summary": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRun {
    pub files: Vec<FileAnalysis>,
    pub summary: ProjectSummary,
}

type ProgressFn = dyn Fn(&str) + Send + Sync;

/// Runs discovery and analysis for one root.
pub struct Runner {
    config: Config,
    cancel: CancelToken,
    progress: Option<Arc<ProgressFn>>,
}

impl Runner {
    /// Create a runner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
            progress: None,
        }
    }

    /// Override the number of worker threads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = Some(jobs);
        self
    }

    /// Use an externally owned cancellation token.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Call `f` with the relative path of every file once it has been analyzed.
    pub fn on_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(f));
        self
    }

    /// Discover, analyze and summarize everything under `root`.
    pub fn run(&self, root: &Path) -> Result<ProjectRun, RunError> {
        let files = self.collect_files(root)?;
        self.analyze(&files)
    }

    /// Find the code files under `root`, sorted by relative path.
    ///
    /// A file `root` yields just that file.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<SourceFile>, RunError> {
        self.config.validate()?;
        let metadata = std::fs::metadata(root).map_err(|source| RunError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        if metadata.is_file() {
            let rel_path = root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.to_string_lossy().into_owned());
            let selected = self.is_selected(root, metadata.len());
            return Ok(selected
                .then(|| SourceFile {
                    abs_path: root.to_path_buf(),
                    rel_path,
                })
                .into_iter()
                .collect());
        }

        let excluded = self.config.exclusion_set()?;
        let include_hidden = self.config.include_hidden;
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_entry(|e| keep_entry(e, root, include_hidden, &excluded));

        for entry in walker {
            if self.cancel.is_cancelled() {
                return Err(RunError::Cancelled);
            }
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let len = match entry.metadata() {
                Ok(m) => m.len(),
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "skipping unreadable file");
                    continue;
                }
            };
            if !self.is_selected(entry.path(), len) {
                continue;
            }

            files.push(SourceFile {
                abs_path: entry.path().to_path_buf(),
                rel_path: relative_path(entry.path(), root),
            });
        }

        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(files)
    }

    fn is_selected(&self, path: &Path, len: u64) -> bool {
        if len > self.config.max_file_bytes() {
            tracing::debug!(path = %path.display(), bytes = len, "skipping oversized file");
            return false;
        }
        if !classify::is_code_file(path) {
            tracing::debug!(path = %path.display(), "skipping binary or unrecognized file");
            return false;
        }
        true
    }

    /// Analyze already collected files and aggregate the results.
    pub fn analyze(&self, files: &[SourceFile]) -> Result<ProjectRun, RunError> {
        let jobs = self.config.jobs();
        tracing::info!(files = files.len(), jobs, "analyzing project");

        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        let mut analyses: Vec<FileAnalysis> = pool.install(|| {
            files
                .par_iter()
                .filter_map(|file| self.analyze_one(file))
                .collect()
        });

        if self.cancel.is_cancelled() {
            return Err(RunError::Cancelled);
        }

        analyses.sort_by(|a, b| a.path.cmp(&b.path));
        let summary = summarize_project(&analyses);
        tracing::info!(
            files = summary.file_count,
            lines = summary.total_lines,
            elements = summary.total_elements,
            "analysis complete"
        );

        Ok(ProjectRun {
            files: analyses,
            summary,
        })
    }

    fn analyze_one(&self, file: &SourceFile) -> Option<FileAnalysis> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let bytes = match std::fs::read(&file.abs_path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(path = %file.abs_path.display(), error = %e, "skipping unreadable file");
                return None;
            }
        };
        let analysis = analyze_bytes(&file.rel_path, &bytes);
        if let Some(progress) = &self.progress {
            progress(&file.rel_path);
        }
        Some(analysis)
    }
}

fn keep_entry(entry: &DirEntry, root: &Path, include_hidden: bool, excluded: &GlobSet) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if !include_hidden && entry.file_name().to_string_lossy().starts_with('.') {
        return false;
    }
    !excluded.is_match(relative_path(entry.path(), root))
}

/// `path` relative to `root`, joined with `/` on every platform.
fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
