//! Integration tests for environment variable overrides

use confload::config::ConfigLoader;
use confload::init;
use std::collections::HashMap;

use crate::integration::{with_env, AppConfig};

#[test]
fn test_env_overrides_default() {
    let config = with_env(&[("SERVER_PORT", Some("9090")), ("SERVER_HOST", None)], || {
        let mut config = AppConfig::default();
        init(&mut config).unwrap();
        config
    });

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "localhost");
}

#[test]
fn test_prefixed_env_ignores_unprefixed_variable() {
    let config = with_env(
        &[("SERVER_PORT", Some("1111")), ("MYAPP_SERVER_PORT", Some("2222"))],
        || {
            ConfigLoader::new()
                .env_prefix("myapp")
                .load::<AppConfig>()
                .unwrap()
        },
    );

    assert_eq!(config.server.port, 2222);
}

#[test]
fn test_empty_env_variable_is_ignored() {
    let vars = HashMap::from([("SERVER_HOST".to_string(), String::new())]);
    let config: AppConfig = ConfigLoader::new().env_source(vars).load().unwrap();
    assert_eq!(config.server.host, "localhost");
}

#[test]
fn test_disabled_env_keeps_defaults() {
    let config = with_env(&[("SERVER_PORT", Some("9090"))], || {
        ConfigLoader::new()
            .automatic_env(false)
            .load::<AppConfig>()
            .unwrap()
    });

    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_independent_loaders_do_not_share_state() {
    let first: AppConfig = ConfigLoader::new()
        .env_source(HashMap::from([(
            "SERVER_PORT".to_string(),
            "1".to_string(),
        )]))
        .load()
        .unwrap();
    let second: AppConfig = ConfigLoader::new()
        .env_source(HashMap::new())
        .load()
        .unwrap();

    assert_eq!(first.server.port, 1);
    assert_eq!(second.server.port, 8080);
}
