//! Dotted field paths and their environment variable names.

use std::fmt;

/// Position of a field in a configuration tree, e.g. `server.port`.
///
/// Root fields have no prefix, so their path is just their name.
/// [`FieldPath::key`] is the lowercase form used for registration and lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty prefix of a top-level structure.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of field `name` nested under this one.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Lowercase dotted key under which defaults and overlays are registered.
    ///
    /// The merged view only holds lowercase keys, so the serde name of every
    /// loaded field must be lowercase too.
    pub fn key(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Environment variable consulted for this path.
    ///
    /// Dots and dashes become underscores and the result is uppercased:
    /// `server.port` maps to `SERVER_PORT`, or `APP_SERVER_PORT` with prefix `app`.
    pub fn env_var(&self, prefix: Option<&str>) -> String {
        let name = env_name(&self.to_string());
        match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{}_{}", env_name(prefix), name),
            None => name,
        }
    }
}

fn env_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
