// file: src/translate/model.rs
// version: 1.0.0
// guid: c5a71e93-2d4f-4b08-8e6c-93f1b2d0a4e7

//! In-memory model of a scanned VirtualBox configuration
//!
//! Entities are stored in file order with an index by reference name, and
//! groups keep the order in which they were first seen.

use std::collections::HashMap;

/// Raw attribute values keyed by attribute name. Values keep their quoting.
pub type Attributes = HashMap<String, String>;

/// Network adapter sub-block of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    /// Zero-based position among the entity's adapters
    pub index: usize,
    pub attributes: Attributes,
}

impl Adapter {
    /// True when the adapter is in NAT mode
    pub fn is_nat(&self) -> bool {
        self.attributes
            .get("network_mode")
            .map(|mode| mode == "\"nat\"")
            .unwrap_or(false)
    }
}

/// One `virtualbox_server` resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Declared reference name, including its quotes
    pub reference: String,
    pub attributes: Attributes,
    pub adapters: Vec<Adapter>,
}

impl Entity {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            attributes: Attributes::new(),
            adapters: Vec::new(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Entities declaring a group are generated only as part of that group
    pub fn is_grouped(&self) -> bool {
        self.attributes.contains_key("group")
    }

    /// An entity without adapters, or with any NAT adapter, needs NAT
    pub fn uses_nat(&self) -> bool {
        self.adapters.is_empty() || self.adapters.iter().any(Adapter::is_nat)
    }
}

/// Named collection of entities sharing one instance group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group identifier as written in the source, including quotes
    pub name: String,
    /// Member reference names in the order they were declared
    pub members: Vec<String>,
}

/// Everything the scanner extracted from one source file
#[derive(Debug, Default, Clone)]
pub struct SourceModel {
    entities: Vec<Entity>,
    by_reference: HashMap<String, usize>,
    groups: Vec<Group>,
    group_index: HashMap<String, usize>,
}

impl SourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh entity and return its slot.
    ///
    /// A repeated reference name creates a new record; lookups by name then
    /// resolve to the most recent one.
    pub fn open_entity(&mut self, reference: &str) -> usize {
        let slot = self.entities.len();
        self.entities.push(Entity::new(reference));
        self.by_reference.insert(reference.to_string(), slot);
        slot
    }

    /// Add an empty adapter to the entity at `slot` and return its index
    pub fn open_adapter(&mut self, slot: usize) -> Option<usize> {
        let entity = self.entities.get_mut(slot)?;
        let index = entity.adapters.len();
        entity.adapters.push(Adapter {
            index,
            attributes: Attributes::new(),
        });
        Some(index)
    }

    pub fn set_entity_attr(&mut self, slot: usize, key: &str, value: &str) {
        let Some(entity) = self.entities.get_mut(slot) else {
            return;
        };
        entity.attributes.insert(key.to_string(), value.to_string());

        if key == "group" {
            let reference = entity.reference.clone();
            self.add_group_member(value, reference);
        }
    }

    /// Store an attribute on the most recently opened adapter of `slot`
    pub fn set_adapter_attr(&mut self, slot: usize, key: &str, value: &str) {
        if let Some(adapter) = self
            .entities
            .get_mut(slot)
            .and_then(|e| e.adapters.last_mut())
        {
            adapter.attributes.insert(key.to_string(), value.to_string());
        }
    }

    fn add_group_member(&mut self, group: &str, reference: String) {
        let slot = match self.group_index.get(group) {
            Some(slot) => *slot,
            None => {
                self.groups.push(Group {
                    name: group.to_string(),
                    members: Vec::new(),
                });
                self.group_index.insert(group.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].members.push(reference);
    }

    /// Entities in file order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, reference: &str) -> Option<&Entity> {
        self.by_reference
            .get(reference)
            .and_then(|slot| self.entities.get(*slot))
    }

    /// Groups in first-seen order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.group_index.get(name).map(|slot| &self.groups[*slot])
    }

    /// Entities that do not belong to any group, in file order
    pub fn standalone_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.is_grouped())
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_membership_is_ordered() {
        let mut model = SourceModel::new();
        let a = model.open_entity("\"a\"");
        model.set_entity_attr(a, "group", "\"db\"");
        let b = model.open_entity("\"b\"");
        model.set_entity_attr(b, "group", "\"web\"");
        let c = model.open_entity("\"c\"");
        model.set_entity_attr(c, "group", "\"db\"");

        let names: Vec<&str> = model.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["\"db\"", "\"web\""]);
        assert_eq!(model.group("\"db\"").unwrap().members, vec!["\"a\"", "\"c\""]);
    }

    #[test]
    fn test_standalone_entities_skip_grouped() {
        let mut model = SourceModel::new();
        let a = model.open_entity("\"a\"");
        model.set_entity_attr(a, "group", "\"db\"");
        model.open_entity("\"b\"");

        let refs: Vec<&str> = model.standalone_entities().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["\"b\""]);
    }

    #[test]
    fn test_nat_detection() {
        let mut model = SourceModel::new();
        let slot = model.open_entity("\"vm\"");
        assert!(model.entity("\"vm\"").unwrap().uses_nat());

        model.open_adapter(slot);
        model.set_adapter_attr(slot, "network_mode", "\"bridged\"");
        assert!(!model.entity("\"vm\"").unwrap().uses_nat());

        model.open_adapter(slot);
        model.set_adapter_attr(slot, "network_mode", "\"nat\"");
        let entity = model.entity("\"vm\"").unwrap();
        assert!(entity.uses_nat());
        assert_eq!(entity.adapters[1].index, 1);
    }

    #[test]
    fn test_duplicate_reference_points_at_latest() {
        let mut model = SourceModel::new();
        let first = model.open_entity("\"vm\"");
        model.set_entity_attr(first, "cpus", "1");
        let second = model.open_entity("\"vm\"");
        model.set_entity_attr(second, "cpus", "2");

        assert_eq!(model.entities().len(), 2);
        assert_eq!(model.entity("\"vm\"").unwrap().attr("cpus"), Some("2"));
    }
}
