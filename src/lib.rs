//! Confload: Layered Configuration Loading
//!
//! Fills a configuration structure from the defaults declared next to its
//! fields, environment variables and an optional config file, in that order
//! of increasing precedence.

pub mod config;
pub mod error;
pub mod logging;

pub use crate::config::{init, init_from_file, ConfigLoader, Fields, Schema};
pub use error::LoadError;
