//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Provides configurable
//! log levels, output formats, and destinations. `LoggingConfig` declares its own
//! defaults, so host applications can embed it in their configuration and load it
//! through [`crate::config`].

use crate::config::{Fields, Schema};
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,

    /// Output format: json, text (default: text)
    pub format: String,

    /// Output destination: stdout, stderr, file, both (stdout and file)
    pub output: String,

    /// Log file path (if output includes a file)
    pub file: PathBuf,

    /// Enable colored output (text format only, terminal outputs only)
    pub color: bool,

    /// Module-specific log levels
    pub modules: HashMap<String, String>,
}

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_FORMAT: &str = "text";
const DEFAULT_OUTPUT: &str = "stdout";
const DEFAULT_FILE: &str = "confload.log";

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            file: PathBuf::from(DEFAULT_FILE),
            color: true,
            modules: HashMap::new(),
        }
    }
}

impl Schema for LoggingConfig {
    fn describe(&self, fields: &mut Fields<'_>) {
        fields
            .leaf("level", DEFAULT_LEVEL)
            .leaf("format", DEFAULT_FORMAT)
            .leaf("output", DEFAULT_OUTPUT)
            .leaf("file", DEFAULT_FILE)
            .leaf("color", "true");
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (CONFLOAD_LOG, CONFLOAD_LOG_FORMAT, etc.)
/// 2. Configuration
/// 3. Defaults
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), LoadError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let use_color = config.map(|c| c.color).unwrap_or(true) && !output.file;
    let writer = make_writer(&output, config)?;

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| LoadError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

fn make_writer(
    output: &OutputDestinations,
    config: Option<&LoggingConfig>,
) -> Result<BoxMakeWriter, LoadError> {
    let writer = match (output.terminal, output.file) {
        (Terminal::Stdout, true) => {
            BoxMakeWriter::new(std::io::stdout.and(open_log_file(config)?))
        }
        (Terminal::Stderr, true) => {
            BoxMakeWriter::new(std::io::stderr.and(open_log_file(config)?))
        }
        (Terminal::None, true) => BoxMakeWriter::new(open_log_file(config)?),
        (Terminal::Stderr, false) => BoxMakeWriter::new(std::io::stderr),
        (Terminal::Stdout, false) | (Terminal::None, false) => BoxMakeWriter::new(std::io::stdout),
    };
    Ok(writer)
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<Arc<File>, LoadError> {
    let log_file = config
        .map(|c| c.file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| LoadError::ConfigError(format!("Failed to create log directory: {}", e)))?;
    }
    open_append(&log_file).map(Arc::new)
}

fn open_append(path: &Path) -> Result<File, LoadError> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoadError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, LoadError> {
    if let Ok(filter) = EnvFilter::try_from_env("CONFLOAD_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or(DEFAULT_LEVEL);
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            filter = filter.add_directive(parse_directive(module, module_level)?);
        }
    }

    if let Ok(modules_str) = std::env::var("CONFLOAD_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            if let Some((module, module_level)) = module_spec.split_once('=') {
                filter = filter.add_directive(parse_directive(module.trim(), module_level.trim())?);
            }
        }
    }

    Ok(filter)
}

fn parse_directive(
    module: &str,
    level: &str,
) -> Result<tracing_subscriber::filter::Directive, LoadError> {
    format!("{}={}", module, level)
        .parse()
        .map_err(|e| LoadError::ConfigError(format!("Invalid log directive: {}", e)))
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, LoadError> {
    if let Ok(format) = std::env::var("CONFLOAD_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or(DEFAULT_FORMAT);
    if format != "json" && format != "text" {
        return Err(LoadError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminal {
    Stdout,
    Stderr,
    None,
}

/// Output destinations
#[derive(Debug)]
struct OutputDestinations {
    terminal: Terminal,
    file: bool,
}

/// Determine output destinations from config or environment
fn determine_output(config: Option<&LoggingConfig>) -> Result<OutputDestinations, LoadError> {
    if let Ok(output) = std::env::var("CONFLOAD_LOG_OUTPUT") {
        return parse_output_destinations(&output);
    }

    let output = config.map(|c| c.output.as_str()).unwrap_or(DEFAULT_OUTPUT);
    parse_output_destinations(output)
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, LoadError> {
    let (terminal, file) = match output {
        "stdout" => (Terminal::Stdout, false),
        "stderr" => (Terminal::Stderr, false),
        "file" => (Terminal::None, true),
        "both" => (Terminal::Stdout, true),
        _ => {
            return Err(LoadError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', or 'both')",
                output
            )))
        }
    };
    Ok(OutputDestinations { terminal, file })
}
