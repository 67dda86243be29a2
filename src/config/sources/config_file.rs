//! Explicit config file source. The format comes from the file extension
//! unless one is forced.

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::Path;

/// Add the config file at `path` to builder as a required source.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    format: Option<FileFormat>,
) -> ConfigBuilder<DefaultState> {
    let file = match format {
        Some(format) => File::from(path).format(format),
        None => File::from(path),
    };
    builder.add_source(file.required(true))
}
