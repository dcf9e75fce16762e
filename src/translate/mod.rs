// file: src/translate/mod.rs
// version: 1.0.0
// guid: d93b6f20-4e7a-41c8-9f05-3a8c2e71b6d4

//! VirtualBox to Yandex Cloud translation core
//!
//! Scanning and generation are separate passes: the whole source is scanned
//! into a [`SourceModel`] before anything is written.

pub mod generator;
pub mod model;
pub mod naming;
pub mod os_catalog;
pub mod scanner;

pub use generator::{CreatedFolders, ResourceGenerator};
pub use model::{Adapter, Entity, Group, SourceModel};
pub use naming::validate_name;
pub use os_catalog::{mangle_os_tag, OsCatalog};
pub use scanner::scan;
