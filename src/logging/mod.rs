// file: src/logging/mod.rs
// version: 1.0.0
// guid: 4a7e1c05-d8b2-4936-8f70-b2c6e39d1a58

//! Logging system for the converter

pub mod logger;

pub use logger::{init_logger, with_operation_span};
