//! `trussc-build --list`

use anyhow::Result;

use crate::cli::Cli;
use trussc_build::ops::list_examples;
use trussc_build::util::GlobalContext;

pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = GlobalContext::new(cli.root.clone())?;
    let shell = super::shell_for(cli);

    let examples = list_examples(&ctx, cli.test_only)?;

    if shell.is_json() {
        let names: Vec<&str> = examples.iter().map(|e| e.name.as_str()).collect();
        shell.json_event(&serde_json::json!({
            "reason": "example-list",
            "examples": names,
        }));
    } else {
        for example in &examples {
            shell.out(example);
        }
    }

    Ok(())
}
