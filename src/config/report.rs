//! Schema report: every known key with its default and environment variable.

use super::registry::Registry;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_var: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaReport {
    pub keys: Vec<KeyReport>,
}

impl SchemaReport {
    /// Build a report from a registry; `env_prefix` is `None` when automatic
    /// environment lookup is off.
    pub fn from_registry(registry: &Registry, env_prefix: Option<Option<&str>>) -> Self {
        let keys = registry
            .entries()
            .iter()
            .map(|entry| KeyReport {
                key: entry.key(),
                default: entry.default.clone(),
                env_var: env_prefix.map(|prefix| entry.path.env_var(prefix)),
            })
            .collect();
        Self { keys }
    }

    pub fn get(&self, key: &str) -> Option<&KeyReport> {
        let key = key.to_lowercase();
        self.keys.iter().find(|k| k.key == key)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Key", "Default", "Environment"]);
        for key in &self.keys {
            table.add_row(vec![
                key.key.clone(),
                key.default.clone().unwrap_or_else(|| "-".to_string()),
                key.env_var.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "No configuration keys.");
        }
        write!(f, "{}", self.to_table())
    }
}
