//! End-of-run summary.

use crate::core::outcome::BuildTally;
use crate::ops::events::BuildEvent;
use crate::util::shell::Shell;

/// Format the human-readable summary.
pub fn format_summary(tally: &BuildTally) -> String {
    let mut lines = vec![
        "=== Build Summary ===".to_string(),
        format!("Total:   {}", tally.total),
        format!("Success: {}", tally.succeeded),
        format!("Failed:  {}", tally.failed()),
        String::new(),
    ];

    if tally.all_succeeded() {
        lines.push("All examples built successfully!".to_string());
    } else {
        lines.push("Failed examples:".to_string());
        lines.extend(tally.failures.iter().map(|f| format!("  - {}", f)));
    }

    lines.join("\n")
}

/// Print the summary: text on stdout, or a `build-finished` event in JSON mode.
pub fn print_summary(shell: &Shell, tally: &BuildTally) {
    if shell.is_json() {
        BuildEvent::build_finished(tally).emit(shell);
    } else {
        shell.out("");
        shell.out(format_summary(tally));
    }
}
