// file: src/config/mod.rs
// version: 2.0.0
// guid: 2b8f5d17-e4c0-4a6b-93d2-7c1e0a58f6b9

//! Configuration module for the converter
//!
//! Handles loading, merging and validation of the credentials and network
//! settings a conversion run needs.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ConversionSettings, Credentials, NetworkSettings, SettingsFile};

/// Availability zones the converter can target
pub const AVAILABILITY_ZONES: [&str; 4] = [
    "ru-central1-a",
    "ru-central1-b",
    "ru-central1-c",
    "ru-central1-d",
];

/// Default name of the generated configuration
pub const DEFAULT_OUTPUT: &str = "yandex_cloud.tf";

/// Default location of a pre-fetched image listing
pub const DEFAULT_IMAGES_FILE: &str = "tools/yc_images.txt";
