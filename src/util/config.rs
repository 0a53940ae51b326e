//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.trussc/build.toml` - User-wide defaults
//! - Project: `<repo>/.trussc/build.toml` - Repository-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-user and per-repository config directory.
pub const CONFIG_DIR_NAME: &str = ".trussc";

/// Name of the config file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "build.toml";

/// Batch build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// External tool locations
    pub tools: ToolsConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Parallel jobs passed to `cmake --build` (None = logical CPU count)
    pub jobs: Option<usize>,

    /// CMake generator for native builds, replacing the platform default
    pub generator: Option<String>,
}

/// Paths to external tools. Unset entries are looked up on PATH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Path to cmake
    pub cmake: Option<PathBuf>,

    /// Path to emscripten's emcmake wrapper
    pub emcmake: Option<PathBuf>,

    /// Path to the projectGenerator executable, tried before the built-in locations
    pub project_generator: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.generator.is_some() {
            self.build.generator = other.build.generator;
        }

        if other.tools.cmake.is_some() {
            self.tools.cmake = other.tools.cmake;
        }
        if other.tools.emcmake.is_some() {
            self.tools.emcmake = other.tools.emcmake;
        }
        if other.tools.project_generator.is_some() {
            self.tools.project_generator = other.tools.project_generator;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`<repo>/.trussc/build.toml`)
/// 2. Global config (`~/.trussc/build.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (`~/.trussc`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (`~/.trussc/build.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the project config path (`<repo>/.trussc/build.toml`).
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.build.jobs.is_none());
        assert!(config.build.generator.is_none());
        assert!(config.tools.cmake.is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("build.toml");

        std::fs::write(
            &config_path,
            r#"
[build]
jobs = 6
generator = "Ninja"

[tools]
cmake = "/opt/cmake/bin/cmake"
emcmake = "/opt/emsdk/upstream/emscripten/emcmake"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.build.jobs, Some(6));
        assert_eq!(config.build.generator, Some("Ninja".to_string()));
        assert_eq!(config.tools.cmake, Some(PathBuf::from("/opt/cmake/bin/cmake")));
        assert_eq!(
            config.tools.emcmake,
            Some(PathBuf::from("/opt/emsdk/upstream/emscripten/emcmake"))
        );
        assert!(config.tools.project_generator.is_none());
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("build.toml");
        std::fs::write(&config_path, "[build]\njobs = \"many\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.jobs = Some(4);
        base.tools.cmake = Some(PathBuf::from("/usr/bin/cmake"));

        let mut override_cfg = Config::default();
        override_cfg.tools.cmake = Some(PathBuf::from("/opt/cmake/bin/cmake"));

        base.merge(override_cfg);

        assert_eq!(base.tools.cmake, Some(PathBuf::from("/opt/cmake/bin/cmake")));
        assert_eq!(base.build.jobs, Some(4)); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[build]
jobs = 2
generator = "Unix Makefiles"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[build]
generator = "Ninja"
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);

        assert_eq!(config.build.generator, Some("Ninja".to_string()));
        assert_eq!(config.build.jobs, Some(2));
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
