//! Locating and invoking the projectGenerator tool.
//!
//! projectGenerator rewrites an example's CMake project files from the
//! shared TrussC template. It is built separately and can live in several
//! places depending on how it was built, so a fixed list of candidates is
//! checked in order.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::platform::PlatformProfile;
use crate::util::process::ProcessBuilder;

/// No candidate path held a projectGenerator binary.
#[derive(Debug, Error)]
#[error("ProjectGenerator not found. Searched locations:\n{}", format_candidates(.searched))]
pub struct GeneratorNotFound {
    pub searched: Vec<PathBuf>,
}

fn format_candidates(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!(" - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Candidate projectGenerator paths, most preferred first.
///
/// `configured` (from the config file) is tried before the built-in layout.
pub fn candidate_paths(
    root: &Path,
    profile: &PlatformProfile,
    configured: Option<&Path>,
) -> Vec<PathBuf> {
    let exe = profile.os.generator_exe_name();
    let pg_root = root.join("projectGenerator");
    let pg_tool = pg_root.join("tools").join("projectGenerator");

    let mut candidates: Vec<PathBuf> = configured.map(Path::to_path_buf).into_iter().collect();
    candidates.extend([
        profile.generator_path(root),
        pg_tool.join("bin").join(exe),
        pg_root.join(exe),
        pg_tool.join("build").join("Release").join(exe),
        pg_tool.join("bin").join("Release").join(exe),
        pg_tool
            .join("bin")
            .join("projectGenerator.app")
            .join("Contents")
            .join("MacOS")
            .join("projectGenerator"),
    ]);

    let mut unique = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

/// Find the projectGenerator binary.
pub fn locate(
    root: &Path,
    profile: &PlatformProfile,
    configured: Option<&Path>,
) -> Result<PathBuf, GeneratorNotFound> {
    let searched = candidate_paths(root, profile, configured);

    match searched.iter().find(|p| p.exists()) {
        Some(found) => {
            tracing::debug!("using projectGenerator at {}", found.display());
            Ok(found.clone())
        }
        None => Err(GeneratorNotFound { searched }),
    }
}

/// `<pg> --update <example> --tc-root <root> [--web]`, run from the root.
pub fn update_command(generator: &Path, example_dir: &Path, root: &Path, web: bool) -> ProcessBuilder {
    let mut cmd = ProcessBuilder::new(generator)
        .arg("--update")
        .arg(example_dir)
        .arg("--tc-root")
        .arg(root)
        .cwd(root);
    if web {
        cmd = cmd.arg("--web");
    }
    cmd
}
