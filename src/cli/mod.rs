// file: src/cli/mod.rs
// version: 2.0.0
// guid: c1e94f72-8a3d-4b65-a0d9-6f2b7e58c013

//! Command line interface for the converter

pub mod args;
pub mod commands;
pub mod sources;

pub use args::{Cli, Commands, ConvertArgs};
pub use commands::*;
