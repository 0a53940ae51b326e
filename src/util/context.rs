//! Global context for batch build operations.
//!
//! Provides centralized access to the repository root and the well-known
//! directories beneath it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::util::config::{global_config_path, load_config, project_config_path, Config};
use crate::util::fs::normalize_path;

/// Directory holding the example projects.
pub const EXAMPLES_DIR: &str = "examples";

/// Directory holding addons, some of which bundle `example-*` projects.
pub const ADDONS_DIR: &str = "addons";

/// Directory holding the framework itself and its shared build outputs.
pub const TRUSSC_DIR: &str = "trussc";

/// Error locating the repository root.
#[derive(Debug, Error)]
pub enum RootError {
    #[error(
        "could not find a TrussC repository (a directory containing `{examples}/` and `{trussc}/`) \
         in `{}` or any parent directory\n\
         hint: pass --root or set TRUSSC_ROOT",
        .start.display(),
        examples = EXAMPLES_DIR,
        trussc = TRUSSC_DIR
    )]
    NotFound { start: PathBuf },

    #[error("repository root `{}` is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
}

/// Global context containing the repository layout.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Absolute, normalized repository root
    root: PathBuf,
}

impl GlobalContext {
    /// Create a context from the current directory.
    ///
    /// An explicit root wins; otherwise the root is searched for upward.
    pub fn new(explicit_root: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Self::with_cwd(cwd, explicit_root)
    }

    /// Create a context, resolving a relative root against `cwd`.
    pub fn with_cwd(cwd: PathBuf, explicit_root: Option<PathBuf>) -> Result<Self> {
        let root = match explicit_root {
            Some(root) => {
                let root = if root.is_absolute() { root } else { cwd.join(root) };
                if !root.is_dir() {
                    return Err(RootError::NotADirectory { path: root }.into());
                }
                normalize_path(&root)
            }
            None => normalize_path(&find_repo_root(&cwd)?),
        };

        tracing::debug!("repository root: {}", root.display());

        Ok(GlobalContext { root })
    }

    /// Get the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/trussc`
    pub fn trussc_dir(&self) -> PathBuf {
        self.root.join(TRUSSC_DIR)
    }

    /// Get the repository configuration file path.
    pub fn config_path(&self) -> PathBuf {
        project_config_path(&self.root)
    }

    /// Load the merged global and repository configuration.
    pub fn load_config(&self) -> Config {
        load_config(global_config_path().as_deref(), &self.config_path())
    }
}

/// Check whether `dir` looks like a TrussC repository root.
pub fn is_repo_root(dir: &Path) -> bool {
    dir.join(EXAMPLES_DIR).is_dir() && dir.join(TRUSSC_DIR).is_dir()
}

/// Search `start` and its ancestors for the repository root.
pub fn find_repo_root(start: &Path) -> Result<PathBuf, RootError> {
    start
        .ancestors()
        .find(|dir| is_repo_root(dir))
        .map(Path::to_path_buf)
        .ok_or_else(|| RootError::NotFound {
            start: start.to_path_buf(),
        })
}
