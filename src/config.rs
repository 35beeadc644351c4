//! Gateway configuration.
//!
//! Built-in defaults, optionally replaced by a YAML file, then overridden by
//! CLI flags / environment variables (see [`crate::cli`]).

use std::path::{Path, PathBuf};

use anyhow::Context;
use model_runtime::WorkerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub const APP_TITLE: &str = "DeepSeek Multi-Task App";
pub const APP_DESCRIPTION: &str = "# 🚀 DeepSeek Multi-Model Application\n\
    *Code Generation with DeepSeek-R1-Distill-Qwen-1.5B & Image Description with deepseek-vl-1.3b-chat*";

pub const CODE_MODEL_ID: &str = "deepseek-ai/DeepSeek-R1-Distill-Qwen-1.5B";
pub const VL_MODEL_PATH: &str = "deepseek-ai/deepseek-vl-1.3b-chat";

const DEFAULT_CODE_WORKER_URL: &str = "http://127.0.0.1:30000";
const DEFAULT_VISION_WORKER_URL: &str = "http://127.0.0.1:30001";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is not a valid http(s) URL: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("{field} must be greater than 0")]
    Zero { field: &'static str },

    #[error("invalid log level '{0}'")]
    LogLevel(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body. Base64 images dominate this.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub json: bool,
    /// Write daily-rotated files here instead of stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.level.clone()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub code_model: WorkerConfig,
    pub vision_model: WorkerConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            code_model: WorkerConfig::new(DEFAULT_CODE_WORKER_URL, CODE_MODEL_ID),
            vision_model: WorkerConfig::new(DEFAULT_VISION_WORKER_URL, VL_MODEL_PATH),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse YAML configuration")
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "server.host",
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::Zero {
                field: "server.port",
            });
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Zero {
                field: "server.max_body_bytes",
            });
        }
        validate_worker(&self.code_model, &CODE_MODEL_FIELDS)?;
        validate_worker(&self.vision_model, &VISION_MODEL_FIELDS)?;
        self.logging.level_filter()?;
        Ok(())
    }
}

/// Dotted names of one worker section's fields, for error messages.
struct WorkerFields {
    base_url: &'static str,
    model_id: &'static str,
    timeout_secs: &'static str,
}

const CODE_MODEL_FIELDS: WorkerFields = WorkerFields {
    base_url: "code_model.base_url",
    model_id: "code_model.model_id",
    timeout_secs: "code_model.timeout_secs",
};

const VISION_MODEL_FIELDS: WorkerFields = WorkerFields {
    base_url: "vision_model.base_url",
    model_id: "vision_model.model_id",
    timeout_secs: "vision_model.timeout_secs",
};

fn validate_worker(worker: &WorkerConfig, fields: &WorkerFields) -> Result<(), ConfigError> {
    if worker.model_id.trim().is_empty() {
        return Err(ConfigError::Empty {
            field: fields.model_id,
        });
    }
    if worker.timeout_secs == 0 {
        return Err(ConfigError::Zero {
            field: fields.timeout_secs,
        });
    }

    let url = worker.base_url.trim();
    if url.is_empty() {
        return Err(ConfigError::Empty {
            field: fields.base_url,
        });
    }
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        field: fields.base_url,
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::InvalidUrl {
            field: fields.base_url,
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}
