//! Validation configuration

use crate::vocabulary::{ExtensionRegistry, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched by [`Config::find_and_load`], in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".xamlfmt.json",
    ".xamlfmt.yaml",
    ".xamlfmt.yml",
    "xamlfmt.json",
];

/// User configuration
///
/// Every list extends the built-in tables; nothing here can remove a default
/// entry except `disabledRules`, which drops whole rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extra tag names accepted by the `unknown-element` rule
    #[serde(default)]
    pub known_elements: Vec<String>,

    /// Extra tag names accepted by the `unknown-control` rule
    #[serde(default)]
    pub known_controls: Vec<String>,

    /// Attribute names merged into per-element whitelists
    #[serde(default)]
    pub known_attributes: HashMap<String, Vec<String>>,

    /// Registered value converter names
    #[serde(default)]
    pub converters: Vec<String>,

    /// Registered markup extension names
    #[serde(default)]
    pub markup_extensions: Vec<String>,

    /// Rule ids that are not run
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Let `namespace-prefix` accept the `xmlns:p` declarations on the root
    /// element and the reserved `xml` / `xmlns` prefixes
    #[serde(default)]
    pub root_namespace_declarations: bool,
}

impl Config {
    /// Load configuration from a JSON or YAML file, picked by extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Self::from_yaml(&content).map_err(|e| ConfigError::Yaml {
                path: path.to_path_buf(),
                source: e,
            }),
            _ => Self::from_json(&content).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Find and load config from `start_dir` or its ancestors
    pub fn find_and_load(start_dir: &Path) -> Option<Self> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let config_path = dir.join(name);
                if !config_path.exists() {
                    continue;
                }
                match Self::load(&config_path) {
                    Ok(config) => {
                        log::debug!("loaded config from {}", config_path.display());
                        return Some(config);
                    }
                    Err(e) => log::warn!("ignoring config: {}", e),
                }
            }
            current = dir.parent();
        }

        None
    }

    /// Built-in vocabulary extended with the configured entries
    pub fn vocabulary(&self) -> Vocabulary {
        let mut vocab = Vocabulary::winui();
        vocab.add_elements(self.known_elements.iter().cloned());
        vocab.add_controls(self.known_controls.iter().cloned());
        for (element, attrs) in &self.known_attributes {
            vocab.add_attributes(element, attrs.iter().cloned());
        }
        vocab
    }

    pub fn registry(&self) -> ExtensionRegistry {
        let mut registry = ExtensionRegistry::new();
        registry.add_converters(self.converters.iter().cloned());
        registry.add_markup_extensions(self.markup_extensions.iter().cloned());
        registry
    }

    pub fn is_rule_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules.iter().any(|r| r == rule_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
