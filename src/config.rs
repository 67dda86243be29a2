//! Configuration System
//!
//! Populates a configuration structure by merging, in increasing precedence,
//! the defaults declared in its [`Schema`], environment variables and an
//! optional config file. The merge itself is delegated to the `config` crate;
//! this module registers the defaults and binds the sources in order.

use crate::error::LoadError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

mod facade;
mod merge;
mod path;
mod registry;
mod report;
mod schema;
mod sources;

pub use config::FileFormat;
pub use facade::ConfigLoader;
pub use path::FieldPath;
pub use registry::{FieldEntry, Fields, Registry};
pub use report::{KeyReport, SchemaReport};
pub use schema::{AsSchema, Schema};
pub use sources::environment::KeyedEnvironment;

/// Load `config` from its declared defaults and the environment.
///
/// Fields without a default or an environment value keep their current value.
pub fn init<T>(config: &mut T) -> Result<(), LoadError>
where
    T: Schema + Serialize + DeserializeOwned,
{
    ConfigLoader::new().load_into(config)
}

/// Load `config` from its declared defaults, the environment and the file at
/// `path`. File values win over environment values.
pub fn init_from_file<T>(path: impl AsRef<Path>, config: &mut T) -> Result<(), LoadError>
where
    T: Schema + Serialize + DeserializeOwned,
{
    ConfigLoader::new()
        .file(path.as_ref())
        .load_into(config)
}
