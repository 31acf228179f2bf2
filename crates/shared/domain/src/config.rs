use serde::Deserialize;
use std::collections::BTreeMap;

/// A mapping profile: the attribute declarations for one record shape plus
/// named importer subsets over them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub attributes: Vec<AttributeConfig>,
    pub importers: BTreeMap<String, ImporterConfig>,
    pub logging: LoggingConfig,
}

/// One registered attribute.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeConfig {
    pub identifier: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Explicit sort key. Declaration order is used when absent.
    #[serde(default)]
    pub order: Option<usize>,
}

/// A named importer covering a subset of the profile's attributes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    pub attributes: Vec<String>,
}

/// Logging knobs read alongside the profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

// --- Default ---

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "default".to_owned(),
            attributes: Vec::new(),
            importers: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), json: false }
    }
}
