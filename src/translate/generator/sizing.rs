// file: src/translate/generator/sizing.rs
// version: 1.0.0
// guid: e2f06b39-7a1c-4c85-bd40-1a9e5f3c8d26

//! Core and memory sizing rules for generated instances
//!
//! With the default 100% guaranteed vCPU share the number of cores and the
//! memory size in GB must both be multiples of two.

use crate::error::{ConvertError, Result};
use crate::translate::model::Entity;
use crate::translate::naming::unquote;

/// Bump odd values to the next even number
pub fn round_up_to_even(value: u64) -> u64 {
    if value % 2 != 0 {
        value + 1
    } else {
        value
    }
}

/// Convert VirtualBox memory in MB to whole GB at 1000 MB each, never below 1
pub fn memory_gb(megabytes: u64) -> u64 {
    (megabytes / 1000).max(1)
}

/// Cores and memory of one generated instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputeSize {
    pub cores: u64,
    pub memory_gb: u64,
}

impl ComputeSize {
    /// Read the required `cpus` and `memory` attributes of an entity
    pub fn of(entity: &Entity) -> Result<Self> {
        let cpus = entity
            .attr("cpus")
            .ok_or_else(|| ConvertError::CpusNotDefined(entity.reference.clone()))?;
        let cores = parse_number(entity, "cpus", cpus)?;

        let memory = entity
            .attr("memory")
            .ok_or_else(|| ConvertError::MemoryNotDefined(entity.reference.clone()))?;
        let memory = parse_number(entity, "memory", memory)?;

        Ok(Self {
            cores,
            memory_gb: memory_gb(memory),
        })
    }

    /// Component-wise maximum
    pub fn max(self, other: Self) -> Self {
        Self {
            cores: self.cores.max(other.cores),
            memory_gb: self.memory_gb.max(other.memory_gb),
        }
    }

    /// Apply the even-rounding rule to both components
    pub fn rounded(self) -> Self {
        Self {
            cores: round_up_to_even(self.cores),
            memory_gb: round_up_to_even(self.memory_gb),
        }
    }
}

/// Parse a numeric attribute, tolerating surrounding quotes
pub fn parse_number(entity: &Entity, field: &'static str, raw: &str) -> Result<u64> {
    unquote(raw)
        .trim()
        .parse()
        .map_err(|_| ConvertError::numeric(field, raw, &entity.reference))
}
