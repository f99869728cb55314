//! Run configuration for codeinventory.
//!
//! Configuration is an optional YAML file. When no path is given explicitly,
//! [`Config::discover`] looks for `codeinventory.yaml` and
//! `.codeinventory.yaml` in the working directory, then `config.yaml` in the
//! user configuration directory. Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File names searched in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["codeinventory.yaml", ".codeinventory.yaml"];

/// Files larger than this are skipped unless configured otherwise.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Errors loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("jobs must be at least 1")]
    ZeroJobs,
    #[error("max_file_bytes must be at least 1")]
    ZeroMaxFileBytes,
    #[error("invalid excluded_paths pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// Worker threads for file analysis (default: available parallelism)
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Glob patterns for paths to skip, matched against the project-relative path
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Whether to descend into hidden files and directories (default: false)
    #[serde(default)]
    pub include_hidden: bool,
    /// Whether to follow symbolic links while walking (default: false)
    #[serde(default)]
    pub follow_links: bool,
    /// Maximum file size in bytes; larger files are skipped
    #[serde(default)]
    pub max_file_bytes: Option<u64>,
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // an empty file deserializes to null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Find the first configuration file that exists.
    pub fn discover(cwd: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| cwd.join(name))
            .chain(user_config_path())
            .find(|p| p.is_file())
    }

    /// Load an explicit config file, or the discovered one, or the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::discover(cwd),
        };
        let config = match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading config");
                Self::parse_file(p)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check field values and compile the exclusion globs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs == Some(0) {
            return Err(ConfigError::ZeroJobs);
        }
        if self.max_file_bytes == Some(0) {
            return Err(ConfigError::ZeroMaxFileBytes);
        }
        self.exclusion_set().map(|_| ())
    }

    /// Number of worker threads to use.
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES)
    }

    /// Compile `excluded_paths` into one matcher.
    pub fn exclusion_set(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::Glob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::Glob {
            pattern: self.excluded_paths.join(", "),
            source,
        })
    }
}

/// `config.yaml` in the per-user configuration directory, if one exists.
fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "codeinventory")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Commented configuration written by `codeinventory init`.
pub const DEFAULT_TEMPLATE: &str = r#"# codeinventory configuration
#
# Every field is optional; remove a line to use the default.

# Worker threads for file analysis (default: number of CPUs)
# jobs: 4

# Glob patterns for project-relative paths to skip
excluded_paths:
  - "**/node_modules/**"
  - "**/vendor/**"
  - "**/target/**"
  - "**/dist/**"
  - "**/build/**"
  - "**/__pycache__/**"

# Descend into hidden files and directories such as .github
include_hidden: false

# Follow symbolic links while walking the tree
follow_links: false

# Skip files larger than this many bytes
max_file_bytes: 5242880
"#;
