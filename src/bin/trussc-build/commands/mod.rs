//! Command implementations

pub mod build;
pub mod list;

use trussc_build::util::shell::{ColorChoice, Shell};

use crate::cli::Cli;

/// Shell configured from the global output flags.
fn shell_for(cli: &Cli) -> Shell {
    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    Shell::from_flags(cli.verbose, color, cli.is_json())
}
