//! Merge rules: defaults, override order, conflict handling.
//!
//! Layers, lowest to highest: the target's current values, registered
//! defaults, environment variables, the bound config file, explicit overrides.

use crate::config::registry::Registry;
use crate::error::LoadError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Value, ValueKind};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// Apply every registered default to builder.
pub fn apply_defaults(
    builder: ConfigBuilder<DefaultState>,
    registry: &Registry,
) -> Result<ConfigBuilder<DefaultState>, LoadError> {
    registry
        .defaults()
        .try_fold(builder, |builder, (key, value)| {
            builder
                .set_default(key.as_str(), value)
                .map_err(|source| LoadError::InvalidKey { key, source })
        })
}

/// Seed the defaults layer with the target's current values.
///
/// Leaves that carry a registered default are skipped so the declared default
/// wins; every other leaf keeps the value it had before the load. Objects are
/// flattened into dotted keys while their keys are plain identifiers; maps with
/// other keys are set as one table.
pub fn apply_current_values(
    builder: ConfigBuilder<DefaultState>,
    current: &JsonValue,
    registry: &Registry,
) -> Result<ConfigBuilder<DefaultState>, LoadError> {
    let defaulted: HashSet<String> = registry.defaults().map(|(key, _)| key).collect();

    let mut leaves = Vec::new();
    flatten(None, current, &mut leaves);

    leaves
        .into_iter()
        .filter(|(key, _)| {
            let key = key.to_lowercase();
            let below = format!("{}.", key);
            !defaulted.contains(&key) && !defaulted.iter().any(|d| d.starts_with(&below))
        })
        .try_fold(builder, |builder, (key, value)| {
            builder
                .set_default(key.as_str(), value)
                .map_err(|source| LoadError::InvalidKey { key, source })
        })
}

fn flatten(prefix: Option<&str>, value: &JsonValue, out: &mut Vec<(String, Value)>) {
    match value {
        JsonValue::Null => {}
        JsonValue::Object(map) if !map.is_empty() && map.keys().all(|k| is_plain_key(k)) => {
            for (name, child) in map {
                let key = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, name),
                    None => name.clone(),
                };
                flatten(Some(&key), child, out);
            }
        }
        other => {
            if let Some(prefix) = prefix {
                out.push((prefix.to_string(), to_config_value(other)));
            }
        }
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn to_config_value(value: &JsonValue) -> Value {
    let kind = match value {
        JsonValue::Null => ValueKind::Nil,
        JsonValue::Bool(b) => ValueKind::Boolean(*b),
        JsonValue::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => ValueKind::I64(i),
            (None, Some(u)) => ValueKind::U64(u),
            (None, None) => ValueKind::Float(n.as_f64().unwrap_or_default()),
        },
        JsonValue::String(s) => ValueKind::String(s.clone()),
        JsonValue::Array(items) => ValueKind::Array(items.iter().map(to_config_value).collect()),
        JsonValue::Object(map) => ValueKind::Table(
            map.iter()
                .map(|(k, v)| (k.clone(), to_config_value(v)))
                .collect(),
        ),
    };
    Value::new(None, kind)
}

/// Apply explicit overrides on top of every other layer.
pub fn apply_overrides(
    builder: ConfigBuilder<DefaultState>,
    overrides: &[(String, String)],
) -> Result<ConfigBuilder<DefaultState>, LoadError> {
    overrides
        .iter()
        .try_fold(builder, |builder, (key, value)| {
            builder
                .set_override(key.as_str(), value.as_str())
                .map_err(|source| LoadError::InvalidKey {
                    key: key.clone(),
                    source,
                })
        })
}
