// file: src/translate/os_catalog.rs
// version: 1.0.0
// guid: 5e9a2f08-c3b1-4d76-a04e-7f28d6b19c35

//! Yandex Cloud image catalog and VirtualBox OS type resolution
//!
//! The catalog is parsed from the pipe-delimited table printed by
//! `yc compute image list`. VirtualBox OS types such as `"Ubuntu23_64"` are
//! mangled into a catalog name prefix (`ubuntu-23-`) and matched against the
//! image names.

use crate::error::{ConvertError, Result};
use tracing::debug;

/// First table field holding an image id
const FIRST_ROW_FIELD: usize = 7;
/// Number of `|` separated fields per table row
const ROW_STRIDE: usize = 6;

/// One image available in the target cloud
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub id: String,
}

/// Image name to image id mapping, kept in table order
#[derive(Debug, Default, Clone)]
pub struct OsCatalog {
    entries: Vec<CatalogEntry>,
}

impl OsCatalog {
    /// Build a catalog from explicit entries
    pub fn from_entries<I, N, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let mut catalog = Self::default();
        for (name, id) in entries {
            catalog.insert(name.into(), id.into());
        }
        catalog
    }

    /// Parse the table printed by the image listing command
    pub fn parse_table(table: &str) -> Self {
        let fields: Vec<&str> = table.split('|').collect();
        let end = fields.len().saturating_sub(2);
        let mut catalog = Self::default();

        let mut i = FIRST_ROW_FIELD;
        while i < end {
            let id = strip_spaces(fields[i]);
            let name = strip_spaces(fields[i + 1]);
            catalog.insert(name, id);
            i += ROW_STRIDE;
        }

        debug!("Loaded {} images into the catalog", catalog.len());
        catalog
    }

    /// Insert an image; a repeated name replaces the earlier id in place
    fn insert(&mut self, name: String, id: String) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.id = id,
            None => self.entries.push(CatalogEntry { name, id }),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the image id for a raw VirtualBox `os_id` value.
    ///
    /// The first entry in table order whose name contains the mangled tag
    /// wins.
    pub fn resolve(&self, os_tag: &str) -> Result<&str> {
        let mangled = mangle_os_tag(os_tag);
        match self.entries.iter().find(|e| e.name.contains(&mangled)) {
            Some(entry) => {
                debug!("Resolved {} to image {} ({})", os_tag, entry.name, entry.id);
                Ok(&entry.id)
            }
            None => Err(ConvertError::UnresolvedOsName {
                tag: os_tag.to_string(),
                mangled,
            }),
        }
    }
}

fn strip_spaces(field: &str) -> String {
    field.split_whitespace().collect()
}

/// Turn a VirtualBox OS type into the image name prefix used by the catalog.
///
/// Only the part before the first underscore is used. A hyphen is inserted
/// before the first digit and appended at the end; quotes are dropped and the
/// result is lower-cased.
pub fn mangle_os_tag(os_tag: &str) -> String {
    let base = os_tag.split('_').next().unwrap_or_default();
    let mut mangled = String::with_capacity(base.len() + 2);

    for (i, ch) in base.char_indices() {
        if ch.is_ascii_digit() {
            mangled.push('-');
            mangled.extend(base[i..].chars().filter(|c| *c != '"'));
            break;
        }
        if ch != '"' {
            mangled.push(ch);
        }
    }

    mangled.push('-');
    mangled.to_lowercase()
}
