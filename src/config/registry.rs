//! Default-value registration: walks a [`Schema`] and records every leaf path.

use super::path::FieldPath;
use super::schema::Schema;
use tracing::debug;

/// A leaf discovered while walking a configuration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub path: FieldPath,
    /// Declared default literal; never empty.
    pub default: Option<String>,
}

impl FieldEntry {
    pub fn key(&self) -> String {
        self.path.key()
    }
}

/// Every leaf of a configuration tree, in declaration order.
///
/// Leaves without a default are kept too: their keys are still consulted in
/// the environment.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<FieldEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and collect its leaves.
    pub fn collect(root: &dyn Schema) -> Self {
        let mut registry = Self::new();
        registry.register(root);
        registry
    }

    /// Walk `root` and add its leaves to this registry.
    pub fn register(&mut self, root: &dyn Schema) {
        match root.resolve() {
            Some(record) => {
                let mut fields = Fields {
                    prefix: FieldPath::root(),
                    registry: self,
                };
                record.describe(&mut fields);
            }
            None => debug!("Configuration root is absent, nothing to register"),
        }
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered `(key, default)` pairs.
    pub fn defaults(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.entries
            .iter()
            .filter_map(|entry| entry.default.as_deref().map(|d| (entry.key(), d)))
    }

    /// Default registered for `key`, matched case-insensitively.
    pub fn default_for(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.key() == key)
            .and_then(|entry| entry.default.as_deref())
    }

    fn insert(&mut self, entry: FieldEntry) {
        let key = entry.key();
        match self.entries.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}

/// Field sink handed to [`Schema::describe`].
pub struct Fields<'r> {
    prefix: FieldPath,
    registry: &'r mut Registry,
}

impl<'r> Fields<'r> {
    /// Path of the record being described.
    pub fn path(&self) -> &FieldPath {
        &self.prefix
    }

    /// Declare a scalar field with an optional default literal.
    ///
    /// An empty default is the same as none.
    pub fn leaf<'d>(&mut self, name: &str, default: impl Into<Option<&'d str>>) -> &mut Self {
        let default = default.into().filter(|d| !d.is_empty());
        self.push_leaf(name, default);
        self
    }

    /// Declare a nested record field.
    ///
    /// The value is resolved through any indirection first. An absent value
    /// registers nothing.
    pub fn nested(&mut self, name: &str, value: &dyn Schema) -> &mut Self {
        let path = self.prefix.child(name);
        match value.resolve() {
            Some(record) => self.descend(path, record),
            None => debug!(field = %path, "Skipping absent nested field"),
        }
        self
    }

    /// Declare a nested record field that falls back to a leaf default when
    /// the value is absent.
    ///
    /// The default is registered at the record's own key, so loading only
    /// works when the field's type also deserializes from that literal, such
    /// as an enum whose unit variant stands for "absent". For other types the
    /// key is only meaningful to [`ConfigLoader::merged`] and
    /// [`ConfigLoader::describe`].
    ///
    /// [`ConfigLoader::merged`]: crate::config::ConfigLoader::merged
    /// [`ConfigLoader::describe`]: crate::config::ConfigLoader::describe
    pub fn nested_or_default(&mut self, name: &str, value: &dyn Schema, default: &str) -> &mut Self {
        match value.resolve() {
            Some(record) => {
                let path = self.prefix.child(name);
                self.descend(path, record);
            }
            None => {
                self.leaf(name, default);
            }
        }
        self
    }

    fn descend(&mut self, path: FieldPath, record: &dyn Schema) {
        let mut child = Fields {
            prefix: path,
            registry: &mut *self.registry,
        };
        record.describe(&mut child);
    }

    fn push_leaf(&mut self, name: &str, default: Option<&str>) {
        let path = self.prefix.child(name);
        if let Some(value) = default {
            debug!(key = %path.key(), default = value, "Registered default");
        }
        self.registry.insert(FieldEntry {
            path,
            default: default.map(str::to_string),
        });
    }
}
