//! High-level operations.
//!
//! This module contains the implementation of trussc-build commands.

pub mod build_all;
pub mod events;
pub mod report;

pub use build_all::{build_all, build_all_with, clean_shared_builds, list_examples, BuildSession};
pub use events::BuildEvent;
pub use report::{format_summary, print_summary};
