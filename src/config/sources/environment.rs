//! Environment source: one variable per known leaf key.
//!
//! Unlike a prefix scan of the whole process environment, only variables that
//! map to a registered path are consulted, so unrelated variables never reach
//! the merged tree.

use crate::config::registry::Registry;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Map, Source, Value, ValueKind};
use std::collections::HashMap;
use tracing::{debug, warn};

/// `config` source reading the environment variable bound to each key.
#[derive(Debug, Clone)]
pub struct KeyedEnvironment {
    /// `(key, variable)` pairs in registration order.
    bindings: Vec<(String, String)>,
    /// Injected variables; the process environment when `None`.
    vars: Option<HashMap<String, String>>,
}

impl KeyedEnvironment {
    /// Bind every leaf of `registry` to its environment variable.
    pub fn new(registry: &Registry, prefix: Option<&str>) -> Self {
        let bindings = registry
            .entries()
            .iter()
            .map(|entry| (entry.key(), entry.path.env_var(prefix)))
            .collect();
        Self {
            bindings,
            vars: None,
        }
    }

    /// Read from `vars` instead of the process environment.
    pub fn source(mut self, vars: Option<HashMap<String, String>>) -> Self {
        self.vars = vars;
        self
    }

    pub fn bindings(&self) -> &[(String, String)] {
        &self.bindings
    }

    fn lookup(&self, var: &str) -> Option<String> {
        match &self.vars {
            Some(vars) => vars.get(var).cloned(),
            None => std::env::var(var).ok(),
        }
    }
}

impl Source for KeyedEnvironment {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let origin = "the environment".to_string();
        let mut values = Map::new();

        for (key, var) in &self.bindings {
            let Some(raw) = self.lookup(var) else {
                continue;
            };
            if raw.is_empty() {
                warn!(variable = %var, "Ignoring empty environment variable");
                continue;
            }
            debug!(key = %key, variable = %var, "Environment override");
            values.insert(key.clone(), Value::new(Some(&origin), ValueKind::String(raw)));
        }

        Ok(values)
    }
}

/// Add the keyed environment source to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    registry: &Registry,
    prefix: Option<&str>,
    vars: Option<HashMap<String, String>>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(KeyedEnvironment::new(registry, prefix).source(vars))
}
