//! trussc-build - batch builder for the TrussC examples
//!
//! This crate finds every example project in a TrussC checkout, regenerates
//! its project files with projectGenerator and builds it with CMake for the
//! host platform and optionally for WebAssembly.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for trussc-build unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{example::Example, options::RunOptions, outcome::BuildTally};
pub use util::context::GlobalContext;
