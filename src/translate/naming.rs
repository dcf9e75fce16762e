// file: src/translate/naming.rs
// version: 1.0.0
// guid: 8d2e4b60-1f3a-47c9-b5d8-0e6a9c3f7b12

//! Resource name validation for Yandex Cloud

use crate::error::{ConvertError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::error;

/// Human readable form of the naming rule, used in diagnostics
pub const NAME_RULE: &str = "the name can contain lowercase Latin letters, numbers, and hyphens; \
the first character must be a letter; the last character must not be a hyphen; \
the minimum length is 2 characters";

fn name_regex() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| Regex::new(r"^[a-z]+[a-z0-9\-]*[a-z0-9]+$").expect("Invalid name regex"))
}

/// Check a resource name against the Yandex Cloud naming rules.
///
/// The caller strips surrounding quotes before calling this.
pub fn validate_name(name: &str) -> Result<()> {
    if name_regex().is_match(name) {
        return Ok(());
    }

    error!("Invalid name \"{}\"! {}", name, NAME_RULE);
    Err(ConvertError::InvalidName {
        name: name.to_string(),
        rule: NAME_RULE,
    })
}

/// Strip one pair of surrounding double quotes, if present
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
