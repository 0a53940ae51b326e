//! Machine-readable build events.
//!
//! Emitted one JSON object per line on stdout with `--message-format json`.
//! New fields may be added, existing ones are not renamed.

use serde::Serialize;

use crate::core::outcome::{BuildOutcome, BuildTally, Failure, Stage};
use crate::util::shell::Shell;

/// An event emitted during a batch build.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reason")]
pub enum BuildEvent<'a> {
    /// The examples to build have been selected.
    #[serde(rename = "build-started")]
    BuildStarted {
        platform: &'a str,
        project_generator: String,
        examples: Vec<&'a str>,
    },

    /// A stage of one example failed. `output` carries the captured tool
    /// output or the launch error, when there is any.
    #[serde(rename = "stage-failed")]
    StageFailed {
        example: &'a str,
        stage: Stage,
        #[serde(skip_serializing_if = "Option::is_none")]
        output: Option<&'a str>,
    },

    /// One example finished, successfully or not.
    #[serde(rename = "example-finished")]
    ExampleFinished {
        example: &'a str,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        stage: Option<Stage>,
    },

    /// All examples have been processed.
    #[serde(rename = "build-finished")]
    BuildFinished {
        success: bool,
        total: usize,
        succeeded: usize,
        failed: usize,
        failures: &'a [Failure],
    },
}

impl<'a> BuildEvent<'a> {
    /// Event for a failed stage.
    pub fn stage_failed(example: &'a str, stage: Stage, output: Option<&'a str>) -> Self {
        BuildEvent::StageFailed {
            example,
            stage,
            output,
        }
    }

    /// Event for one example's outcome.
    pub fn example_finished(example: &'a str, outcome: BuildOutcome) -> Self {
        let stage = match outcome {
            BuildOutcome::Success => None,
            BuildOutcome::Failed { stage } => Some(stage),
        };
        BuildEvent::ExampleFinished {
            example,
            success: outcome.is_success(),
            stage,
        }
    }

    /// Final summary event.
    pub fn build_finished(tally: &'a BuildTally) -> Self {
        BuildEvent::BuildFinished {
            success: tally.all_succeeded(),
            total: tally.total,
            succeeded: tally.succeeded,
            failed: tally.failed(),
            failures: &tally.failures,
        }
    }

    /// Write this event through the shell (no-op outside JSON mode).
    pub fn emit(&self, shell: &Shell) {
        match serde_json::to_value(self) {
            Ok(value) => shell.json_event(&value),
            Err(e) => tracing::warn!("failed to serialize build event: {}", e),
        }
    }
}
