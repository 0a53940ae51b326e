//! Core data types for the batch build.

pub mod example;
pub mod options;
pub mod outcome;
pub mod platform;

pub use example::{discover_examples, select_examples, DiscoveryError, Example};
pub use options::RunOptions;
pub use outcome::{BuildOutcome, BuildTally, Failure, Stage};
pub use platform::{Os, PlatformProfile, WEB_BUILD_DIR};
