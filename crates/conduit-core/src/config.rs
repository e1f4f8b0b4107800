//! Conduit configuration
//!
//! Configuration is read once when a device is constructed and is immutable
//! for that device's lifetime. A changed value reaches a device only when the
//! host rebuilds it.

use crate::errors::{ConduitError, Result};
use crate::types::KindId;
use serde::{Deserialize, Serialize};

/// Default per-tick energy cost of a network interface.
pub const DEFAULT_ENERGY_USAGE: u32 = 2;

/// Upper bound accepted for `energy_usage`.
pub const MAX_ENERGY_USAGE: u32 = 100;

/// Kind id of the Conduit interface device itself.
pub const INTERFACE_KIND: &str = "conduit:storage_interface";

/// Peer kinds an interface connects to out of the box.
pub const DEFAULT_PEER_KINDS: &[&str] = &[
    INTERFACE_KIND,
    "refinedstorage:cable",
    "refinedstorage:controller",
    "refinedstorage:creative_controller",
    "refinedstorage:importer",
    "refinedstorage:exporter",
    "refinedstorage:interface",
    "refinedstorage:external_storage",
];

/// Trait for configuration validation
pub trait ConfigValidation {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;
}

/// Settings consumed by Conduit devices at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConduitConfig {
    /// Energy drawn from the network per tick (0..=100). Zero lets the device
    /// run on a network without a controller.
    pub energy_usage: u32,
    /// Kinds that count as a compatible neighbor for standalone devices
    pub peer_kinds: Vec<KindId>,
}

impl Default for ConduitConfig {
    fn default() -> Self {
        Self {
            energy_usage: DEFAULT_ENERGY_USAGE,
            peer_kinds: DEFAULT_PEER_KINDS.iter().map(|k| KindId::new(*k)).collect(),
        }
    }
}

impl ConduitConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Kind id used by interface devices for self-chaining and as store actor.
    pub fn interface_kind() -> KindId {
        KindId::new(INTERFACE_KIND)
    }
}

impl ConfigValidation for ConduitConfig {
    fn validate(&self) -> Result<()> {
        if self.energy_usage > MAX_ENERGY_USAGE {
            return Err(ConduitError::invalid_config(
                "energy_usage",
                format!("{} exceeds maximum {MAX_ENERGY_USAGE}", self.energy_usage),
            ));
        }
        if self.peer_kinds.is_empty() {
            return Err(ConduitError::invalid_config(
                "peer_kinds",
                "at least one peer kind is required",
            ));
        }
        Ok(())
    }
}
