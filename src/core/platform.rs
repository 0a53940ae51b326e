//! Host platform profiles.
//!
//! Each supported host maps to a fixed [`PlatformProfile`]: the name of the
//! per-example native build directory, the CMake generator to force (if any)
//! and where the projectGenerator binary lives in a standard checkout.

use std::fmt;
use std::path::{Path, PathBuf};

/// Build directory used for WebAssembly builds on every host.
pub const WEB_BUILD_DIR: &str = "build-web";

/// Host operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
}

impl Os {
    /// Map an OS name to a family.
    ///
    /// Accepts Rust's `std::env::consts::OS` values as well as the
    /// `uname`-style names (`Darwin`, `Windows`). Anything unrecognized is
    /// treated as Linux.
    pub fn from_name(name: &str) -> Os {
        match name.to_ascii_lowercase().as_str() {
            "windows" | "win32" => Os::Windows,
            "macos" | "darwin" => Os::MacOs,
            _ => Os::Linux,
        }
    }

    /// The OS this binary was compiled for.
    pub fn host() -> Os {
        Os::from_name(std::env::consts::OS)
    }

    /// Short tag used in output and build directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::MacOs => "macos",
            Os::Linux => "linux",
        }
    }

    /// File name of the projectGenerator executable on this OS.
    pub fn generator_exe_name(&self) -> &'static str {
        match self {
            Os::Windows => "projectGenerator.exe",
            Os::MacOs | Os::Linux => "projectGenerator",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed per-platform build settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    /// OS family
    pub os: Os,

    /// Native build directory name inside each example (e.g. `build-linux`)
    pub build_dir: &'static str,

    /// CMake generator passed with `-G`, if the platform forces one
    pub cmake_generator: Option<&'static str>,

    /// projectGenerator location relative to the repository root
    pub generator_bin_path: &'static [&'static str],
}

impl PlatformProfile {
    /// Profile for the given OS family.
    pub fn for_os(os: Os) -> Self {
        match os {
            Os::Windows => PlatformProfile {
                os,
                build_dir: "build-windows",
                cmake_generator: Some("Visual Studio 17 2022"),
                generator_bin_path: &[
                    "projectGenerator",
                    "tools",
                    "projectGenerator",
                    "bin",
                    "projectGenerator.exe",
                ],
            },
            Os::MacOs => PlatformProfile {
                os,
                build_dir: "build-macos",
                cmake_generator: None,
                generator_bin_path: &[
                    "projectGenerator",
                    "tools",
                    "projectGenerator",
                    "bin",
                    "projectGenerator.app",
                    "Contents",
                    "MacOS",
                    "projectGenerator",
                ],
            },
            Os::Linux => PlatformProfile {
                os,
                build_dir: "build-linux",
                cmake_generator: None,
                generator_bin_path: &[
                    "projectGenerator",
                    "tools",
                    "projectGenerator",
                    "bin",
                    "projectGenerator",
                ],
            },
        }
    }

    /// Profile for an OS name; unknown names get the Linux profile.
    pub fn for_name(name: &str) -> Self {
        Self::for_os(Os::from_name(name))
    }

    /// Profile for the host this binary runs on.
    pub fn host() -> Self {
        Self::for_os(Os::host())
    }

    /// Expected projectGenerator path under `root`.
    pub fn generator_path(&self, root: &Path) -> PathBuf {
        self.generator_bin_path
            .iter()
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }
}
