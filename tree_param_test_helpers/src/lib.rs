//! Test helpers shared across crates in the workspace.
//!
//! [`DocumentTree`] lays out YAML fixtures in a temporary directory and
//! [`cwd`] serialises tests that need to change the working directory.

pub mod cwd;
mod fixture;

pub use fixture::DocumentTree;
