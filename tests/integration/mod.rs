//! Integration tests for confload

mod env_overrides;
mod load_defaults;

pub use test_utils::{with_env, write_config, AppConfig, ServerConfig};
