//! Sources layered over the registered defaults.

pub mod config_file;
pub mod environment;
