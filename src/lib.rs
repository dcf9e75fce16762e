// file: src/lib.rs
// version: 3.0.0
// guid: 6e2d8a41-b9c3-4f07-a5e1-0c7f93d2b868

//! # VirtualBox to Yandex Cloud converter
//!
//! Reads a Terraform configuration written for the VirtualBox provider and
//! writes an equivalent configuration for the Yandex Cloud provider: a VPC
//! network and subnet, instance groups for grouped machines and compute
//! instances for everything else.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod translate;

pub use error::{ConvertError, Result};

/// Version information for the converter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
