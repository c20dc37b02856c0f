//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

use super::controller::ControllerConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named controller bindings.
    #[serde(default)]
    pub controllers: FnvIndexMap<String<32>, ControllerConfig, 16>,
}

impl SystemConfig {
    /// Get a controller binding by name.
    pub fn controller(&self, name: &str) -> Option<&ControllerConfig> {
        self.controllers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a controller binding by name, with error if not found.
    pub fn controller_or_error(&self, name: &str) -> Result<&ControllerConfig> {
        self.controller(name).ok_or_else(|| {
            Error::Config(ConfigError::ControllerNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })
    }

    /// List all controller names.
    pub fn controller_names(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(|s| s.as_str())
    }
}
