//! TOML-backed [`ConfigStore`] implementation.
//!
//! Loads the whole configuration from a single TOML file. Parse and read
//! failures carry the file path so the caller can report which file was at
//! fault.

use super::{AdvancedSettings, ComponentId, ComponentTemplate, ConfigStore, LocationPolicy};
use crate::core::{ComponentryError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Configuration loaded from a TOML file.
///
/// Every section is optional; missing sections fall back to their defaults
/// (no components, default roots, empty policy, nothing visible on listings).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfigStore {
    #[serde(rename = "components")]
    component_templates: BTreeMap<ComponentId, ComponentTemplate>,
    #[serde(rename = "settings")]
    advanced_settings: AdvancedSettings,
    #[serde(rename = "locations")]
    location_policy: LocationPolicy,
    visible_on_listing: BTreeSet<ComponentId>,
}

impl TomlConfigStore {
    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentryError::ConfigRead`] if the file cannot be read and
    /// [`ComponentryError::ConfigParse`] if it is not valid TOML for the
    /// expected schema.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ComponentryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let store: Self =
            toml::from_str(&raw).map_err(|source| ComponentryError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            components = store.component_templates.len(),
            "loaded componentry config"
        );
        Ok(store)
    }

    /// Parses configuration from an in-memory TOML string.
    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

impl ConfigStore for TomlConfigStore {
    fn component_templates(&self) -> &BTreeMap<ComponentId, ComponentTemplate> {
        &self.component_templates
    }

    fn advanced_settings(&self) -> &AdvancedSettings {
        &self.advanced_settings
    }

    fn location_policy(&self) -> &LocationPolicy {
        &self.location_policy
    }

    fn visible_on_listing(&self) -> &BTreeSet<ComponentId> {
        &self.visible_on_listing
    }
}
