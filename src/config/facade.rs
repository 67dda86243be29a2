//! Config facade: the merge context and its load entry points.

use super::merge::merge_policy;
use super::registry::Registry;
use super::report::SchemaReport;
use super::schema::Schema;
use super::sources::{config_file, environment};
use crate::error::LoadError;
use config::{Config, FileFormat};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Merge context for loading configuration structures.
///
/// Each load builds a fresh merged view from the structure's declared
/// defaults, the environment and the optional file, so independent loaders
/// never share state.
///
/// Precedence, lowest to highest: the structure's current value, declared
/// default, environment variable, config file, explicit override.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    file_format: Option<FileFormat>,
    automatic_env: bool,
    env_prefix: Option<String>,
    env_vars: Option<HashMap<String, String>>,
    overrides: Vec<(String, String)>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            file: None,
            file_format: None,
            automatic_env: true,
            env_prefix: None,
            env_vars: None,
            overrides: Vec::new(),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a config file. It must exist when loading.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Force the file format instead of detecting it from the extension.
    pub fn file_format(mut self, format: FileFormat) -> Self {
        self.file_format = Some(format);
        self
    }

    /// Consult the environment for every known key (default: on).
    pub fn automatic_env(mut self, enabled: bool) -> Self {
        self.automatic_env = enabled;
        self
    }

    /// Prefix for environment variable names, e.g. `APP` for `APP_SERVER_PORT`.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Read environment variables from `vars` instead of the process environment.
    pub fn env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Set a value above every other layer.
    pub fn set_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides
            .push((key.into().to_lowercase(), value.into()));
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Known keys of `root` with their defaults and environment variables.
    pub fn describe(&self, root: &dyn Schema) -> SchemaReport {
        let registry = Registry::collect(root);
        let env_prefix = self
            .automatic_env
            .then_some(self.env_prefix.as_deref());
        SchemaReport::from_registry(&registry, env_prefix)
    }

    /// Merged settings view for `root`, before deserialization.
    pub fn merged(&self, root: &dyn Schema) -> Result<Config, LoadError> {
        let registry = Registry::collect(root);
        self.build(&registry, None)
    }

    /// Populate `target` in place.
    ///
    /// Fields with no declared default and no environment or file value keep
    /// their current value. On error `target` is left as it was.
    pub fn load_into<T>(&self, target: &mut T) -> Result<(), LoadError>
    where
        T: Schema + Serialize + DeserializeOwned,
    {
        let registry = Registry::collect(&*target);
        let current = serde_json::to_value(&*target).map_err(LoadError::Snapshot)?;
        let merged = self.build(&registry, Some(&current))?;
        *target = merged.try_deserialize().map_err(LoadError::Parse)?;

        info!(
            keys = registry.len(),
            file = ?self.file,
            "Configuration loaded"
        );
        Ok(())
    }

    /// Load a fresh `T`, walking its `Default` value for declared defaults.
    pub fn load<T>(&self) -> Result<T, LoadError>
    where
        T: Schema + Serialize + DeserializeOwned + Default,
    {
        let mut target = T::default();
        self.load_into(&mut target)?;
        Ok(target)
    }

    fn build(
        &self,
        registry: &Registry,
        current: Option<&serde_json::Value>,
    ) -> Result<Config, LoadError> {
        let mut builder = Config::builder();
        if let Some(current) = current {
            builder = merge_policy::apply_current_values(builder, current, registry)?;
        }
        builder = merge_policy::apply_defaults(builder, registry)?;

        if self.automatic_env {
            builder = environment::add_to_builder(
                builder,
                registry,
                self.env_prefix.as_deref(),
                self.env_vars.clone(),
            );
        }

        if let Some(path) = &self.file {
            builder = config_file::add_to_builder(builder, path, self.file_format);
        }

        builder = merge_policy::apply_overrides(builder, &self.overrides)?;

        builder.build().map_err(|source| LoadError::Read {
            path: self.file.clone(),
            source,
        })
    }
}
