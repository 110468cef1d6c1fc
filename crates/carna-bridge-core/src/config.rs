use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_KEY: &str = "lastBodyIndexData";
pub const DEFAULT_USER_LANGUAGE: &str = "en-EN";
pub const DEFAULT_TELEMETRY_GLOBAL: &str = "ga";
pub const DEFAULT_EMBED_ELEMENT_ID: &str = "main";

/// Where the core application attaches itself in the document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MountTarget {
    #[default]
    Fullscreen,
    Embed {
        #[serde(rename = "elementId", default = "default_embed_element_id")]
        element_id: String,
    },
}

impl MountTarget {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fullscreen => "fullscreen",
            Self::Embed { .. } => "embed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    pub storage_key: String,
    pub default_language: String,
    pub telemetry_global: String,
    pub mount: MountTarget,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_language: DEFAULT_USER_LANGUAGE.to_string(),
            telemetry_global: DEFAULT_TELEMETRY_GLOBAL.to_string(),
            mount: MountTarget::Fullscreen,
        }
    }
}

impl BridgeConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::BlankField("storageKey"));
        }
        if self.default_language.trim().is_empty() {
            return Err(ConfigError::BlankField("defaultLanguage"));
        }
        if self.telemetry_global.trim().is_empty() {
            return Err(ConfigError::BlankField("telemetryGlobal"));
        }
        if let MountTarget::Embed { element_id } = &self.mount {
            if element_id.trim().is_empty() {
                return Err(ConfigError::BlankField("mount.elementId"));
            }
        }
        Ok(())
    }
}

fn default_embed_element_id() -> String {
    DEFAULT_EMBED_ELEMENT_ID.to_string()
}
