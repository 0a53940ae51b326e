//! Subprocess execution utilities.
//!
//! Every external tool (projectGenerator, cmake, emcmake) is run through a
//! [`CommandRunner`]. The runner never returns an error: a child that cannot
//! be spawned and a child that exits non-zero are both reported as
//! [`RunOutcome`] values so the build driver can attribute them to a stage.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command with stdout and stderr captured into one stream.
    ///
    /// Both streams share a single pipe, so the text keeps the order in which
    /// the child wrote it.
    pub fn exec_merged(&self) -> Result<(ExitStatus, Vec<u8>)> {
        let (mut reader, writer) = std::io::pipe().context("failed to create output pipe")?;
        let stderr_writer = writer.try_clone().context("failed to create output pipe")?;

        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(writer);
        cmd.stderr(stderr_writer);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;
        // The command holds the write ends; the read below only sees EOF once
        // they are closed.
        drop(cmd);

        let mut output = Vec::new();
        reader
            .read_to_end(&mut output)
            .with_context(|| format!("failed to read output of `{}`", self.program.display()))?;
        let status = child
            .wait()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        Ok((status, output))
    }

    /// Execute with inherited stdio and return status only.
    pub fn status(&self) -> Result<ExitStatus> {
        let mut cmd = self.build_command();
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;
        Ok(status)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

impl fmt::Display for ProcessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_command())
    }
}

/// Result of running one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process exited with status 0.
    Success,

    /// The process ran but exited unsuccessfully.
    ///
    /// `output` holds the captured stdout and stderr, interleaved as written.
    /// It is empty when output was streamed live.
    ExitedNonZero { code: Option<i32>, output: String },

    /// The process could not be started at all.
    LaunchFailed { message: String },
}

impl RunOutcome {
    /// Check whether the command succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }

    /// Text to show the user after a failure, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            RunOutcome::Success => None,
            RunOutcome::ExitedNonZero { output, .. } if output.trim().is_empty() => None,
            RunOutcome::ExitedNonZero { output, .. } => Some(output),
            RunOutcome::LaunchFailed { message } => Some(message),
        }
    }
}

/// Something that can run external commands.
pub trait CommandRunner {
    /// Run a command to completion.
    fn run(&mut self, cmd: &ProcessBuilder) -> RunOutcome;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    /// Create a runner. In verbose mode children stream to the terminal.
    pub fn new(verbose: bool) -> Self {
        SystemRunner { verbose }
    }

    fn run_streaming(cmd: &ProcessBuilder) -> RunOutcome {
        match cmd.status() {
            Ok(status) if status.success() => RunOutcome::Success,
            Ok(status) => RunOutcome::ExitedNonZero {
                code: status.code(),
                output: String::new(),
            },
            Err(e) => RunOutcome::LaunchFailed {
                message: format!("{:#}", e),
            },
        }
    }

    fn run_captured(cmd: &ProcessBuilder) -> RunOutcome {
        match cmd.exec_merged() {
            Ok((status, _)) if status.success() => RunOutcome::Success,
            Ok((status, output)) => RunOutcome::ExitedNonZero {
                code: status.code(),
                output: String::from_utf8_lossy(&output).into_owned(),
            },
            Err(e) => RunOutcome::LaunchFailed {
                message: format!("{:#}", e),
            },
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> RunOutcome {
        tracing::debug!("running `{}`", cmd);
        let outcome = if self.verbose {
            Self::run_streaming(cmd)
        } else {
            Self::run_captured(cmd)
        };
        if let RunOutcome::ExitedNonZero { code, .. } = &outcome {
            tracing::debug!("`{}` exited with code {:?}", cmd.get_program().display(), code);
        }
        outcome
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake.
pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}

/// Find the emscripten CMake wrapper.
pub fn find_emcmake() -> Option<PathBuf> {
    find_executable("emcmake")
}
