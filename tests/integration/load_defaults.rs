//! Integration tests for declared defaults

use confload::config::ConfigLoader;
use confload::{init, Fields, Schema};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::integration::{with_env, AppConfig, ServerConfig};

#[test]
fn test_init_populates_declared_defaults() {
    let config = with_env(&[("SERVER_PORT", None), ("SERVER_HOST", None)], || {
        let mut config = AppConfig::default();
        init(&mut config).unwrap();
        config
    });

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "localhost");
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Scalars {
    enabled: bool,
    ratio: f64,
    retries: i32,
    name: String,
    #[serde(default)]
    label: Option<String>,
}

impl Schema for Scalars {
    fn describe(&self, fields: &mut Fields<'_>) {
        fields
            .leaf("enabled", "true")
            .leaf("ratio", "0.25")
            .leaf("retries", "-3")
            .leaf("name", "scalars")
            .leaf("label", None);
    }
}

#[test]
fn test_defaults_are_coerced_to_field_types() {
    let config: Scalars = ConfigLoader::new()
        .env_source(HashMap::new())
        .load()
        .unwrap();

    assert!(config.enabled);
    assert_eq!(config.ratio, 0.25);
    assert_eq!(config.retries, -3);
    assert_eq!(config.name, "scalars");
    assert_eq!(config.label, None);
}

#[test]
fn test_leaf_without_default_still_reads_environment() {
    let vars = HashMap::from([("LABEL".to_string(), "from-env".to_string())]);
    let config: Scalars = ConfigLoader::new().env_source(vars).load().unwrap();
    assert_eq!(config.label.as_deref(), Some("from-env"));
}

#[test]
fn test_describe_reports_defaults() {
    let report = ConfigLoader::new().describe(&AppConfig::default());
    assert_eq!(report.keys.len(), 2);

    let port = report.get("server.port").unwrap();
    assert_eq!(port.default.as_deref(), Some("8080"));
    assert_eq!(port.env_var.as_deref(), Some("SERVER_PORT"));
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Tuning {
    workers: u32,
    name: String,
}

impl Schema for Tuning {
    fn describe(&self, fields: &mut Fields<'_>) {
        fields.leaf("workers", None).leaf("name", None);
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Service {
    server: ServerConfig,
    debug: bool,
    tuning: Tuning,
}

impl Schema for Service {
    fn describe(&self, fields: &mut Fields<'_>) {
        fields
            .nested("server", &self.server)
            .leaf("debug", None)
            .nested("tuning", &self.tuning);
    }
}

fn preset_service() -> Service {
    Service {
        debug: true,
        tuning: Tuning {
            workers: 4,
            name: "batch".to_string(),
        },
        ..Default::default()
    }
}

#[test]
fn test_leaf_without_default_or_source_keeps_current_value() {
    let mut service = preset_service();
    ConfigLoader::new()
        .env_source(HashMap::new())
        .load_into(&mut service)
        .unwrap();

    assert!(service.debug);
    assert_eq!(service.tuning.workers, 4);
    assert_eq!(service.tuning.name, "batch");
    assert_eq!(service.server.port, 8080);
    assert_eq!(service.server.host, "localhost");
}

#[test]
fn test_untagged_leaves_still_read_environment() {
    let vars = HashMap::from([
        ("DEBUG".to_string(), "false".to_string()),
        ("TUNING_WORKERS".to_string(), "16".to_string()),
    ]);
    let mut service = preset_service();
    ConfigLoader::new()
        .env_source(vars)
        .load_into(&mut service)
        .unwrap();

    assert!(!service.debug);
    assert_eq!(service.tuning.workers, 16);
    assert_eq!(service.tuning.name, "batch");
}

#[test]
fn test_load_starts_from_default_for_untagged_leaves() {
    let service: Service = ConfigLoader::new()
        .env_source(HashMap::new())
        .load()
        .unwrap();

    assert!(!service.debug);
    assert_eq!(service.tuning.workers, 0);
    assert_eq!(service.tuning.name, "");
}
