//! Test utilities and mocks for trussc-build unit tests.
//!
//! [`MockRunner`] stands in for real child processes so the build driver can
//! be exercised without projectGenerator or CMake installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use trussc_build::test_support::{MockRunner, RepoFixture};
//!
//! #[test]
//! fn test_example() {
//!     let repo = RepoFixture::new();
//!     repo.add_example("examples/foo");
//!
//!     let mut runner = MockRunner::new();
//!     runner.fail_in("examples/foo", "--build", RunOutcome::LaunchFailed { message: "boom".into() });
//!
//!     // Use the runner with a BuildSession...
//! }
//! ```

pub mod fixtures;

use anyhow::{bail, Result};

use crate::util::process::{CommandRunner, ProcessBuilder, RunOutcome};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Pattern for matching command lines in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command line.
    Exact(String),
    /// Match if command line starts with prefix.
    StartsWith(String),
    /// Match if command line contains substring.
    Contains(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command line.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => line == s,
            CommandPattern::StartsWith(s) => line.starts_with(s),
            CommandPattern::Contains(s) => line.contains(s),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command run.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against the command line.
    pub pattern: CommandPattern,
    /// Only match commands for this example (checked against cwd and args).
    pub example: Option<String>,
    /// Outcome to return when matched.
    pub outcome: RunOutcome,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, outcome: RunOutcome) -> Self {
        CommandExpectation {
            pattern,
            example: None,
            outcome,
            times: None,
            used: 0,
        }
    }

    /// Restrict the expectation to one example.
    pub fn for_example(mut self, fragment: impl Into<String>) -> Self {
        self.example = Some(fragment.into());
        self
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }

    fn matches(&self, cmd: &ProcessBuilder) -> bool {
        let line = slashes(&cmd.display_command());
        if !self.pattern.matches(&line) {
            return false;
        }
        match self.example {
            Some(ref fragment) => {
                let cwd = cmd
                    .get_cwd()
                    .map(|p| slashes(&p.display().to_string()))
                    .unwrap_or_default();
                cwd.ends_with(fragment.as_str()) || line.contains(fragment.as_str())
            }
            None => true,
        }
    }
}

fn slashes(s: &str) -> String {
    s.replace('\\', "/")
}

/// Mock command runner.
///
/// Every command is recorded. Commands that match no expectation succeed.
#[derive(Debug)]
pub struct MockRunner {
    expectations: Vec<CommandExpectation>,
    calls: Vec<ProcessBuilder>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        MockRunner {
            expectations: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Fail commands for one example whose line contains `substring`.
    ///
    /// `example` is a `/`-separated path fragment such as `examples/foo`.
    pub fn fail_in(&mut self, example: &str, substring: &str, outcome: RunOutcome) -> &mut Self {
        self.expectations.push(
            CommandExpectation::new(CommandPattern::Contains(substring.to_string()), outcome)
                .for_example(example),
        );
        self
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.expectations.push(expectation);
        self
    }

    /// All commands that were run, in order.
    pub fn calls(&self) -> &[ProcessBuilder] {
        &self.calls
    }

    /// Command lines of all runs, with the program shown by file name only.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|cmd| {
                let program = cmd
                    .get_program()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let mut parts = vec![program];
                parts.extend(cmd.get_args().iter().map(|a| a.to_string_lossy().into_owned()));
                parts.join(" ")
            })
            .collect()
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        for (i, exp) in self.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl CommandRunner for MockRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> RunOutcome {
        self.calls.push(cmd.clone());

        for exp in &mut self.expectations {
            if exp.available() && exp.matches(cmd) {
                exp.used += 1;
                return exp.outcome.clone();
            }
        }

        RunOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> RunOutcome {
        RunOutcome::ExitedNonZero {
            code: Some(1),
            output: "error".to_string(),
        }
    }

    #[test]
    fn test_mock_runner_defaults_to_success() {
        let mut runner = MockRunner::new();
        let outcome = runner.run(&ProcessBuilder::new("cmake").arg("--version"));

        assert_eq!(outcome, RunOutcome::Success);
        assert_eq!(runner.call_lines(), vec!["cmake --version"]);
    }

    #[test]
    fn test_mock_runner_patterns() {
        let mut runner = MockRunner::new();
        runner.expect_pattern(CommandExpectation::new(
            CommandPattern::Exact("cmake -S . -B build-web".to_string()),
            failed(),
        ));
        runner.expect_pattern(CommandExpectation::new(
            CommandPattern::StartsWith("emcmake".to_string()),
            failed(),
        ));

        assert_eq!(
            runner.run(&ProcessBuilder::new("cmake").args(["-S", ".", "-B", "build-web"])),
            failed()
        );
        assert_eq!(runner.run(&ProcessBuilder::new("emcmake").arg("cmake")), failed());
        assert!(runner.run(&ProcessBuilder::new("cmake").arg("--build")).is_success());
    }

    #[test]
    fn test_mock_runner_times() {
        let mut runner = MockRunner::new();
        runner.expect_pattern(CommandExpectation::new(CommandPattern::Any, failed()).times(1));

        assert!(!runner.run(&ProcessBuilder::new("a")).is_success());
        assert!(runner.run(&ProcessBuilder::new("b")).is_success());
        assert!(runner.verify().is_ok());
    }

    #[test]
    fn test_fail_in_matches_cwd_or_args() {
        let mut runner = MockRunner::new();
        runner.fail_in("examples/foo", "cmake", failed());

        let in_foo = ProcessBuilder::new("cmake").arg("-S").cwd("/repo/examples/foo");
        let in_bar = ProcessBuilder::new("cmake").arg("-S").cwd("/repo/examples/bar");
        let names_foo = ProcessBuilder::new("cmake").arg("/repo/examples/foo").cwd("/repo");

        assert!(!runner.run(&in_foo).is_success());
        assert!(runner.run(&in_bar).is_success());
        assert!(!runner.run(&names_foo).is_success());
        assert_eq!(runner.calls().len(), 3);
    }
}
