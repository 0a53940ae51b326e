//! Test fixtures for common test scenarios.
//!
//! [`RepoFixture`] lays out a throwaway TrussC checkout on disk.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::platform::PlatformProfile;
use crate::util::context::{GlobalContext, EXAMPLES_DIR, TRUSSC_DIR};
use crate::util::fs::normalize_path;

/// A temporary repository root with `examples/` and `trussc/`.
#[derive(Debug)]
pub struct RepoFixture {
    _tmp: TempDir,
    root: PathBuf,
}

impl RepoFixture {
    /// Create a repository root containing `examples/` and `trussc/`.
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.mkdir(EXAMPLES_DIR);
        repo.mkdir(TRUSSC_DIR);
        repo
    }

    /// Create a repository root at `<tmp>/<parent>/TrussC`.
    pub fn under(parent: &str) -> Self {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(parent).join("TrussC");
        std::fs::create_dir_all(&dir).unwrap();
        let repo = RepoFixture {
            root: normalize_path(&dir),
            _tmp: tmp,
        };
        repo.mkdir(EXAMPLES_DIR);
        repo.mkdir(TRUSSC_DIR);
        repo
    }

    /// Create an empty directory to use as a root.
    pub fn empty() -> Self {
        let tmp = TempDir::new().unwrap();
        // Canonical so paths match what GlobalContext produces
        let root = normalize_path(tmp.path());
        RepoFixture { _tmp: tmp, root }
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a directory (and parents) below the root.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a file below the root, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Create an example project at `rel` (a directory with `src/main.cpp`).
    pub fn add_example(&self, rel: &str) -> PathBuf {
        self.write(&format!("{}/src/main.cpp", rel), "int main() { return 0; }\n");
        self.root.join(rel)
    }

    /// Place an empty projectGenerator binary where the host profile expects it.
    pub fn install_generator(&self) -> PathBuf {
        let path = PlatformProfile::host().generator_path(&self.root);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, "").unwrap();
        path
    }

    /// A context rooted at this repository.
    pub fn context(&self) -> GlobalContext {
        GlobalContext::with_cwd(self.root.clone(), Some(self.root.clone())).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_fixture_layout() {
        let repo = RepoFixture::new();
        let example = repo.add_example("examples/foo");

        assert!(repo.root().join("examples").is_dir());
        assert!(repo.root().join("trussc").is_dir());
        assert!(example.join("src/main.cpp").is_file());
    }

    #[test]
    fn test_install_generator() {
        let repo = RepoFixture::new();
        let path = repo.install_generator();

        assert!(path.is_file());
        assert!(path.starts_with(repo.root()));
    }
}
