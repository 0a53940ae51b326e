//! External build tool drivers.
//!
//! This module knows how to invoke projectGenerator and CMake; it does not
//! run anything itself.

pub mod cmake;
pub mod project_generator;

pub use cmake::Toolset;
pub use project_generator::GeneratorNotFound;
