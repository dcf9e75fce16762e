// file: src/config/settings.rs
// version: 1.0.0
// guid: 61c8e2b4-0f7d-4a39-8e15-d9b3a6c04f7e

//! Conversion settings structures

use super::AVAILABILITY_ZONES;
use crate::error::{ConvertError, Result};
use crate::translate::naming::validate_name;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// Smallest allowed subnet prefix length
pub const MIN_SUBNET_PREFIX: u8 = 16;
/// Largest allowed subnet prefix length
pub const MAX_SUBNET_PREFIX: u8 = 28;

/// Credentials and defaults written into the provider block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// IAM or OAuth token used for authentication
    pub token: String,
    /// Cloud to apply resources to
    pub cloud_id: String,
    /// Folder to operate under when a resource does not name one
    pub folder_id: String,
    /// Default availability zone
    pub zone: String,
}

/// Network and subnet shared by every generated instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    pub network_name: String,
    pub subnet_name: String,
    /// Internal IPv4 block of the subnet, e.g. `10.0.0.0/24`
    pub cidr: String,
}

/// Complete settings for one conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSettings {
    pub credentials: Credentials,
    pub network: NetworkSettings,
    /// Service account id per unquoted group name
    #[serde(default)]
    pub service_accounts: HashMap<String, String>,
}

/// Settings as read from a file; anything missing is asked for later
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub credentials: PartialCredentials,
    pub network: PartialNetwork,
    pub service_accounts: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialCredentials {
    pub token: Option<String>,
    pub cloud_id: Option<String>,
    pub folder_id: Option<String>,
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialNetwork {
    pub network_name: Option<String>,
    pub subnet_name: Option<String>,
    pub cidr: Option<String>,
}

impl Credentials {
    /// Validate the credentials
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("token", &self.token),
            ("cloud_id", &self.cloud_id),
            ("folder_id", &self.folder_id),
        ] {
            if value.is_empty() {
                return Err(ConvertError::validation(format!("{} cannot be empty", field)));
            }
        }

        validate_zone(&self.zone)
    }
}

impl NetworkSettings {
    /// Validate network and subnet names and the CIDR block
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.network_name)?;
        validate_name(&self.subnet_name)?;
        validate_cidr(&self.cidr)
    }
}

impl ConversionSettings {
    /// Validate the complete settings
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        self.network.validate()?;
        Ok(())
    }
}

/// The zone must be one of the known availability zones
pub fn validate_zone(zone: &str) -> Result<()> {
    if AVAILABILITY_ZONES.contains(&zone) {
        Ok(())
    } else {
        Err(ConvertError::validation(format!(
            "Unknown availability zone: {} (expected one of {})",
            zone,
            AVAILABILITY_ZONES.join(", ")
        )))
    }
}

/// Validate an IPv4 CIDR block with a prefix between /16 and /28
pub fn validate_cidr(cidr: &str) -> Result<()> {
    let (address, prefix) = cidr.split_once('/').ok_or_else(|| {
        ConvertError::validation(format!(
            "CIDR block must include a prefix length (e.g. 10.0.0.0/22): {}",
            cidr
        ))
    })?;

    let prefix: u8 = prefix
        .parse()
        .map_err(|_| ConvertError::validation(format!("Invalid subnet size: {}", cidr)))?;
    if !(MIN_SUBNET_PREFIX..=MAX_SUBNET_PREFIX).contains(&prefix) {
        return Err(ConvertError::validation(format!(
            "Invalid subnet size /{}: minimum subnet size is /{}, maximum is /{}",
            prefix, MAX_SUBNET_PREFIX, MIN_SUBNET_PREFIX
        )));
    }

    address
        .parse::<Ipv4Addr>()
        .map_err(|_| ConvertError::validation(format!("Invalid IPv4 address: {}", address)))?;

    Ok(())
}
