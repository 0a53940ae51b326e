//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use trussc_build::core::options::RunOptions;

/// trussc-build - Update and build every TrussC example
#[derive(Parser)]
#[command(name = "trussc-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Delete build directories before configuring
    #[arg(long)]
    pub clean: bool,

    /// Also build for WebAssembly
    #[arg(long)]
    pub web: bool,

    /// Build for WebAssembly only (implies --web)
    #[arg(long)]
    pub web_only: bool,

    /// Build only examples/tests/AllFeaturesExample
    #[arg(long)]
    pub test_only: bool,

    /// Stream build tool output and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Repository root (defaults to searching upward from the current directory)
    #[arg(long, env = "TRUSSC_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print the examples that would be built and exit
    #[arg(long)]
    pub list: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Output format for build messages
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

impl Cli {
    /// Run options for the build driver.
    pub fn run_options(&self) -> RunOptions {
        RunOptions::new(
            self.clean,
            self.web,
            self.web_only,
            self.test_only,
            self.verbose,
        )
    }

    pub fn is_json(&self) -> bool {
        self.message_format == MessageFormat::Json
    }
}
