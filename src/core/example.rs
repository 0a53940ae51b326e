//! Example project discovery.
//!
//! An example is any directory with a direct `src/` child. They are found in
//! two places:
//!
//! - anywhere under `examples/`, skipping paths that look like templates,
//!   tools or generated build trees
//! - as `addons/<addon>/example-*` directories shipped with an addon

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::util::context::{ADDONS_DIR, EXAMPLES_DIR};
use crate::util::fs::{has_subdir, relative_path};

/// Name of the source directory that marks an example project.
pub const SOURCE_DIR: &str = "src";

/// Directories under `examples/` whose path contains any of these are skipped.
///
/// Matching is by substring on the full path, not by path component:
/// `examples/toolsDemo/src` is skipped as well, and so is every example of a
/// checkout that lives below a `tools` directory.
pub const EXCLUDED_SUBSTRINGS: &[&str] = &[
    "templates",
    "tools",
    "build",
    "bin",
    "emscripten",
    "CMakeFiles",
];

/// Prefix of example directories bundled inside addons.
pub const ADDON_EXAMPLE_PREFIX: &str = "example-";

/// Location of the single example built in test-only mode, relative to the root.
pub const TEST_EXAMPLE_PATH: &[&str] = &[EXAMPLES_DIR, "tests", "AllFeaturesExample"];

/// Errors that stop the run before any example is built.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("No example directories found under `{}`", .root.display())]
    NoExamples { root: PathBuf },

    #[error("AllFeaturesExample not found at: {}", .path.display())]
    TestExampleMissing { path: PathBuf },
}

/// A buildable example project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Example {
    /// Absolute path to the example directory
    pub path: PathBuf,

    /// Display name: the path relative to the repository root
    pub name: String,
}

impl Example {
    /// Create an example, naming it relative to `root`.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let name = relative_path(root, &path).display().to_string();
        Example { path, name }
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Check whether a full path hits an exclusion.
pub fn is_excluded(path: &Path) -> bool {
    let text = path.to_string_lossy();
    EXCLUDED_SUBSTRINGS.iter().any(|pattern| text.contains(pattern))
}

/// Find every example under `root`, sorted and deduplicated.
pub fn discover_examples(root: &Path) -> Vec<Example> {
    let mut paths = BTreeSet::new();

    paths.extend(scan_examples_tree(root));
    paths.extend(scan_addon_examples(&root.join(ADDONS_DIR)));

    tracing::debug!("discovered {} example(s)", paths.len());

    paths
        .into_iter()
        .map(|path| Example::new(root, path))
        .collect()
}

/// Walk `<root>/examples` for directories containing `src/`.
fn scan_examples_tree(root: &Path) -> Vec<PathBuf> {
    let examples_dir = root.join(EXAMPLES_DIR);
    if !examples_dir.is_dir() {
        return Vec::new();
    }

    // Every descendant of an excluded directory has the excluded text in its
    // own path as well, so whole subtrees can be pruned.
    WalkDir::new(&examples_dir)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return false;
            }
            let excluded = is_excluded(entry.path());
            if excluded {
                tracing::debug!("skipping {}", entry.path().display());
            }
            !excluded
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("error walking examples: {}", e);
                None
            }
        })
        .filter(|entry| has_subdir(entry.path(), SOURCE_DIR))
        .map(|entry| entry.into_path())
        .collect()
}

/// Collect `<addons>/<addon>/example-*` directories containing `src/`.
///
/// The `examples/` exclusion list does not apply here.
fn scan_addon_examples(addons_dir: &Path) -> Vec<PathBuf> {
    let Ok(addons) = std::fs::read_dir(addons_dir) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for addon in addons.flatten() {
        let addon_path = addon.path();
        if !addon_path.is_dir() {
            continue;
        }
        let Ok(items) = std::fs::read_dir(&addon_path) else {
            continue;
        };
        for item in items.flatten() {
            let is_example = item
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(ADDON_EXAMPLE_PREFIX));
            if is_example && has_subdir(&item.path(), SOURCE_DIR) {
                found.push(item.path());
            }
        }
    }
    found
}

/// Resolve the single example used in test-only mode.
pub fn test_example(root: &Path) -> Result<Example, DiscoveryError> {
    let path = TEST_EXAMPLE_PATH
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment));

    if path.exists() {
        Ok(Example::new(root, path))
    } else {
        Err(DiscoveryError::TestExampleMissing { path })
    }
}

/// Select the examples to build for this run.
pub fn select_examples(root: &Path, test_only: bool) -> Result<Vec<Example>, DiscoveryError> {
    let examples = if test_only {
        vec![test_example(root)?]
    } else {
        discover_examples(root)
    };

    if examples.is_empty() {
        return Err(DiscoveryError::NoExamples {
            root: root.to_path_buf(),
        });
    }

    Ok(examples)
}
