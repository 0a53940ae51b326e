//! CMake command construction for native and web builds.

use std::path::{Path, PathBuf};

use crate::core::platform::{PlatformProfile, WEB_BUILD_DIR};
use crate::util::config::Config;
use crate::util::process::{find_cmake, find_emcmake, ProcessBuilder};

/// Build configuration requested from multi-config generators.
pub const BUILD_CONFIG: &str = "Release";

/// Check whether a generator picks the build configuration itself and
/// schedules its own parallelism (so `-j` must not be passed).
pub fn is_multi_config_ide(generator: &str) -> bool {
    generator.contains("Visual Studio") || generator == "Xcode"
}

/// Logical CPU count of the host.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

/// External build tools resolved for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolset {
    /// cmake executable
    pub cmake: PathBuf,

    /// emcmake wrapper, if available
    pub emcmake: Option<PathBuf>,

    /// Native generator passed with `-G`
    pub generator: Option<String>,

    /// Parallel job count for `cmake --build`
    pub jobs: usize,
}

impl Toolset {
    /// Resolve tools from config, falling back to PATH and the platform profile.
    ///
    /// When cmake is neither configured nor on PATH the bare name `cmake` is
    /// used, so each configure step fails with a launch error instead of the
    /// whole run aborting.
    pub fn resolve(config: &Config, profile: &PlatformProfile) -> Self {
        let cmake = config
            .tools
            .cmake
            .clone()
            .or_else(find_cmake)
            .unwrap_or_else(|| PathBuf::from("cmake"));

        let emcmake = config.tools.emcmake.clone().or_else(find_emcmake);

        let generator = config
            .build
            .generator
            .clone()
            .or_else(|| profile.cmake_generator.map(str::to_string));

        let jobs = config.build.jobs.filter(|&j| j > 0).unwrap_or_else(default_jobs);

        Toolset {
            cmake,
            emcmake,
            generator,
            jobs,
        }
    }

    /// `cmake -S . -B <build_dir> [-G <generator>]`
    pub fn configure_native(&self, example_dir: &Path, build_dir: &str) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .args(["-S", ".", "-B", build_dir])
            .cwd(example_dir);
        if let Some(ref generator) = self.generator {
            cmd = cmd.arg("-G").arg(generator);
        }
        cmd
    }

    /// `cmake --build <build_dir> --config Release [-j <n>]`
    pub fn build_native(&self, example_dir: &Path, build_dir: &str) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .args(["--build", build_dir, "--config", BUILD_CONFIG])
            .cwd(example_dir);
        let ide = self.generator.as_deref().is_some_and(is_multi_config_ide);
        if !ide {
            cmd = cmd.arg("-j").arg(self.jobs.to_string());
        }
        cmd
    }

    /// `[emcmake] cmake -S . -B build-web`
    pub fn configure_web(&self, example_dir: &Path) -> ProcessBuilder {
        let cmd = match self.emcmake {
            Some(ref emcmake) => ProcessBuilder::new(emcmake).arg(&self.cmake),
            None => ProcessBuilder::new(&self.cmake),
        };
        cmd.args(["-S", ".", "-B", WEB_BUILD_DIR]).cwd(example_dir)
    }

    /// `cmake --build build-web -j <n>`
    pub fn build_web(&self, example_dir: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.cmake)
            .args(["--build", WEB_BUILD_DIR, "-j"])
            .arg(self.jobs.to_string())
            .cwd(example_dir)
    }
}
