//! Build stages and result accounting.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step of the per-example pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Regenerate project files with projectGenerator
    Update,
    /// `cmake -S . -B build-<os>`
    NativeConfigure,
    /// `cmake --build build-<os>`
    NativeBuild,
    /// `[emcmake] cmake -S . -B build-web`
    WebConfigure,
    /// `cmake --build build-web`
    WebBuild,
}

impl Stage {
    /// Label used in the failure report.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Update => "update",
            Stage::NativeConfigure => "native-conf",
            Stage::NativeBuild => "native-build",
            Stage::WebConfigure => "web-conf",
            Stage::WebBuild => "web-build",
        }
    }

    /// Message printed when the stage fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Stage::Update => "Project update failed!",
            Stage::NativeConfigure => "Native Configure failed!",
            Stage::NativeBuild => "Native Build failed!",
            Stage::WebConfigure => "Web Configure failed!",
            Stage::WebBuild => "Web Build failed!",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Result of building one example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    Failed { stage: Stage },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

/// A failed example and the stage it stopped at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub example: String,
    pub stage: Stage,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.example, self.stage.label())
    }
}

/// Running totals for a batch build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildTally {
    /// Number of examples processed
    pub total: usize,

    /// Examples that completed every stage
    pub succeeded: usize,

    /// Failed examples, in processing order
    pub failures: Vec<Failure>,
}

impl BuildTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        BuildTally::default()
    }

    /// Record the outcome for one example.
    pub fn record(&mut self, example: &str, outcome: BuildOutcome) {
        self.total += 1;
        match outcome {
            BuildOutcome::Success => self.succeeded += 1,
            BuildOutcome::Failed { stage } => self.failures.push(Failure {
                example: example.to_string(),
                stage,
            }),
        }
    }

    /// Number of failed examples.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether every processed example succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit code for this tally: 0 iff nothing failed.
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}
