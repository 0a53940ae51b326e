//! Default command: update and build every example

use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use trussc_build::ops::{build_all, print_summary};
use trussc_build::util::GlobalContext;

pub fn execute(cli: &Cli) -> Result<i32> {
    let ctx = GlobalContext::new(cli.root.clone())?;
    let shell = Arc::new(super::shell_for(cli));

    // Load configuration (global + project)
    let config = ctx.load_config();

    let tally = build_all(&ctx, &config, cli.run_options(), &shell)?;
    print_summary(&shell, &tally);

    Ok(tally.exit_code())
}
