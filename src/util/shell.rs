//! Centralized shell output and progress management.
//!
//! The Shell module provides a unified API for all CLI output, including:
//! - Status messages with consistent formatting
//! - A progress bar over the examples being built (via indicatif)
//! - JSON output mode for machine-readable output
//!
//! # Design Principles
//!
//! 1. **Commands never manage spacing/indentation directly** - Shell handles all formatting
//! 2. **JSON mode is mutually exclusive** - No human output when JSON mode is enabled
//! 3. **Status lines never tear the progress bar** - they are printed above it

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Shell output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable output with optional colors and progress bars.
    Human {
        verbosity: Verbosity,
        color: ColorChoice,
    },
    /// Machine-readable JSON output only.
    Json,
}

/// Output verbosity level (Human mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: status messages + progress bar
    Normal,
    /// --verbose: build tool output streams live, no progress bar
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

/// Status types for output messages.
///
/// Shell handles all formatting - callers just specify the semantic status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Found,
    Finished,
    Removed,

    // In-progress statuses (cyan)
    Building,
    Updating,
    Cleaning,

    // Info statuses (blue/default)
    Info,

    // Failure statuses (red)
    Failed,
    Error,
}

impl Status {
    /// Get the display text for this status.
    fn as_str(&self) -> &'static str {
        match self {
            Status::Found => "Found",
            Status::Finished => "Finished",
            Status::Removed => "Removed",
            Status::Building => "Building",
            Status::Updating => "Updating",
            Status::Cleaning => "Cleaning",
            Status::Info => "Info",
            Status::Failed => "Failed",
            Status::Error => "error",
        }
    }

    /// Get the ANSI color code for this status.
    fn color_code(&self) -> &'static str {
        match self {
            Status::Found | Status::Finished | Status::Removed => "\x1b[1;32m",
            Status::Building | Status::Updating | Status::Cleaning => "\x1b[1;36m",
            Status::Info => "\x1b[1;34m",
            Status::Failed | Status::Error => "\x1b[1;31m",
        }
    }

    /// Get the width for alignment (12 characters).
    fn width(&self) -> usize {
        12
    }
}

/// Central shell for all CLI output.
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
    /// Bar currently drawn at the bottom of stderr, if any
    active_bar: Mutex<Option<ProgressBar>>,
}

impl Shell {
    /// Create a new shell with the given mode.
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell {
            mode,
            use_color,
            active_bar: Mutex::new(None),
        }
    }

    /// Create a shell from CLI flags with proper precedence.
    ///
    /// JSON mode takes precedence over verbose.
    pub fn from_flags(verbose: bool, color: ColorChoice, message_format_json: bool) -> Self {
        let mode = if message_format_json {
            ShellMode::Json
        } else {
            let verbosity = if verbose {
                Verbosity::Verbose
            } else {
                Verbosity::Normal
            };
            ShellMode::Human { verbosity, color }
        };

        Shell::new(mode)
    }

    /// Check if shell is in verbose mode.
    pub fn is_verbose(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Verbose,
                ..
            }
        )
    }

    /// Check if shell is in JSON mode.
    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    ///
    /// In JSON mode, messages are silently ignored (use json_event for JSON output).
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() {
            return;
        }

        let line = format!("{} {}", self.format_status(status), msg);
        self.eprint_line(&line);
    }

    /// Print an info message.
    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    /// Print an error message.
    ///
    /// In JSON mode, this outputs a JSON error event.
    pub fn error(&self, msg: impl Display) {
        if self.is_json() {
            let event = serde_json::json!({
                "reason": "error",
                "message": msg.to_string()
            });
            self.json_event(&event);
        } else {
            self.status(Status::Error, msg);
        }
    }

    /// Print captured tool output verbatim to stderr.
    pub fn dump(&self, text: &str) {
        if self.is_json() {
            return;
        }
        self.eprint_line(text.trim_end());
    }

    /// Print a line to stdout (reports, listings).
    pub fn out(&self, msg: impl Display) {
        if self.is_json() {
            return;
        }
        self.with_bar_suspended(|| println!("{}", msg));
    }

    /// Print a JSON event to stdout.
    ///
    /// Only works in JSON mode; silently ignored in human mode.
    pub fn json_event(&self, event: &serde_json::Value) {
        if !self.is_json() {
            return;
        }

        let json_str = serde_json::to_string(event).unwrap_or_default();
        println!("{}", json_str);
        let _ = io::stdout().flush();
    }

    /// Format a status prefix with optional color.
    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        let width = status.width();

        if self.use_color {
            let color = status.color_code();
            format!("{}{:>width$}\x1b[0m", color, text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    }

    fn eprint_line(&self, line: &str) {
        self.with_bar_suspended(|| eprintln!("{}", line));
    }

    fn with_bar_suspended(&self, f: impl FnOnce()) {
        let bar = self
            .active_bar
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().cloned());
        match bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Create a progress bar over `total` items.
    ///
    /// In verbose or JSON mode, or when stderr is not a terminal, the
    /// returned progress is a no-op.
    pub fn progress(self: &Arc<Self>, total: u64, msg: impl Display) -> Progress {
        Progress::new(Arc::clone(self), total, msg.to_string())
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("mode", &self.mode)
            .field("use_color", &self.use_color)
            .finish_non_exhaustive()
    }
}

/// Progress bar wrapper that respects shell mode.
pub struct Progress {
    shell: Arc<Shell>,
    pb: Option<ProgressBar>,
}

impl Progress {
    fn new(shell: Arc<Shell>, total: u64, message: String) -> Self {
        let pb = if shell.is_verbose() || shell.is_json() || !io::stderr().is_terminal() {
            None
        } else if total > 1 {
            let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
            if let Ok(style) =
                ProgressStyle::default_bar().template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message(message);
            Some(pb)
        } else {
            None
        };

        if let Some(ref bar) = pb {
            if let Ok(mut active) = shell.active_bar.lock() {
                *active = Some(bar.clone());
            }
        }

        Progress { shell, pb }
    }

    /// Increment progress.
    pub fn inc(&self, delta: u64) {
        if let Some(pb) = &self.pb {
            pb.inc(delta);
        }
    }

    /// Set the message shown next to the bar.
    pub fn set_message(&self, msg: impl Display) {
        if let Some(pb) = &self.pb {
            pb.set_message(msg.to_string());
        }
    }

    /// Finish and remove the bar.
    pub fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
        if let Ok(mut active) = self.shell.active_bar.lock() {
            *active = None;
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish();
    }
}
