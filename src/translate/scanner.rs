// file: src/translate/scanner.rs
// version: 1.1.0
// guid: 0b7f3c1d-9e42-4a85-b6d1-5c8e2a71f903

//! Line scanner for VirtualBox Terraform configurations
//!
//! The source dialect is line oriented: every line holds at most one
//! assignment or one block opener. The scanner tracks whether it is outside
//! any resource, inside a `virtualbox_server` block, or inside one of its
//! `network_adapter` sub-blocks.

use super::model::SourceModel;
use crate::error::{ConvertError, Result};
use std::io::BufRead;
use tracing::{debug, warn};

/// Marker of a source entity block
pub const ENTITY_MARKER: &str = "resource \"virtualbox_server\"";
/// Marker of a network adapter sub-block
pub const ADAPTER_MARKER: &str = "network_adapter";
/// Whitespace token position of the entity reference name on its opener line
const REFERENCE_TOKEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    /// `depth` counts nested non-adapter blocks opened inside the entity
    InEntity { entity: usize, depth: usize },
    /// `entity` is `None` for an adapter block seen before any entity
    InAdapter { entity: Option<usize>, depth: usize },
}

/// Scan a source configuration into a [`SourceModel`].
pub fn scan<R: BufRead>(reader: R) -> Result<SourceModel> {
    let mut model = SourceModel::new();
    let mut state = ScanState::Outside;

    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(ConvertError::Read)?;
        state = step(&mut model, state, &line, number + 1);
    }

    if let ScanState::InAdapter { entity, .. } = state {
        let owner = entity
            .and_then(|slot| model.entities().get(slot))
            .map(|e| e.reference.as_str())
            .unwrap_or("<none>");
        warn!("Unterminated network_adapter block in {} at end of input", owner);
    }

    debug!(
        "Scanned {} entities and {} groups",
        model.entities().len(),
        model.groups().len()
    );
    Ok(model)
}

fn step(model: &mut SourceModel, state: ScanState, line: &str, number: usize) -> ScanState {
    match state {
        ScanState::InAdapter { entity, depth } => {
            if line.trim() == "}" {
                return match entity {
                    Some(slot) => ScanState::InEntity { entity: slot, depth },
                    None => ScanState::Outside,
                };
            }
            if let (Some(slot), Some((key, value))) = (entity, split_assignment(line)) {
                model.set_adapter_attr(slot, key, value);
            }
            state
        }
        ScanState::InEntity { entity, depth } => {
            if line.trim() == "}" {
                return match depth {
                    0 => {
                        debug!("Line {}: end of virtual machine block", number);
                        ScanState::Outside
                    }
                    _ => ScanState::InEntity { entity, depth: depth - 1 },
                };
            }

            if let Some((key, value)) = split_assignment(line) {
                if opens_block(value) {
                    return ScanState::InEntity { entity, depth: depth + 1 };
                }
                if depth == 0 {
                    model.set_entity_attr(entity, key, value);
                }
                state
            } else if line.contains(ADAPTER_MARKER) {
                ScanState::InAdapter {
                    entity: model.open_adapter(entity).map(|_| entity),
                    depth,
                }
            } else if opens_block(line) {
                ScanState::InEntity { entity, depth: depth + 1 }
            } else {
                state
            }
        }
        ScanState::Outside => {
            if split_assignment(line).is_some() {
                debug!("Line {}: assignment outside of any resource ignored", number);
                state
            } else if line.contains(ENTITY_MARKER) {
                match line.split_whitespace().nth(REFERENCE_TOKEN) {
                    Some(reference) => {
                        debug!("Line {}: found virtual machine {}", number, reference);
                        ScanState::InEntity {
                            entity: model.open_entity(reference),
                            depth: 0,
                        }
                    }
                    None => {
                        warn!("Line {}: resource without a reference name ignored", number);
                        state
                    }
                }
            } else if line.contains(ADAPTER_MARKER) {
                ScanState::InAdapter { entity: None, depth: 0 }
            } else {
                state
            }
        }
    }
}

/// True when a line or value ends by opening a nested block
fn opens_block(text: &str) -> bool {
    text.trim_end().ends_with('{')
}

/// Split a line on its first `=` into a trimmed key and value
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
}
