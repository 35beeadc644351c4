use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

/// HTTP gateway for DeepSeek code generation and image description
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dsmt", author, version, about, long_about = None)]
pub struct CliArgs {
    /// YAML configuration file; flags below override its values
    #[arg(long, env = "DSMT_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "DSMT_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "DSMT_PORT")]
    pub port: Option<u16>,

    /// Base URL of the code model worker (OpenAI chat completions)
    #[arg(long, env = "DSMT_CODE_WORKER_URL")]
    pub code_worker_url: Option<String>,

    #[arg(long, env = "DSMT_CODE_MODEL_ID")]
    pub code_model_id: Option<String>,

    /// Base URL of the vision-language worker (`/generate`)
    #[arg(long, env = "DSMT_VISION_WORKER_URL")]
    pub vision_worker_url: Option<String>,

    #[arg(long, env = "DSMT_VISION_MODEL_ID")]
    pub vision_model_id: Option<String>,

    /// Per-request timeout applied to both workers
    #[arg(long, env = "DSMT_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, env = "DSMT_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    #[arg(long, env = "DSMT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "DSMT_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    /// Write daily-rotated log files to this directory
    #[arg(long, env = "DSMT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the effective configuration: defaults, then the YAML file,
    /// then any flag or environment variable that was set.
    pub fn into_config(self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_yaml_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(max_body_bytes) = self.max_body_bytes {
            config.server.max_body_bytes = max_body_bytes;
        }

        if let Some(url) = self.code_worker_url {
            config.code_model.base_url = url;
        }
        if let Some(model_id) = self.code_model_id {
            config.code_model.model_id = model_id;
        }
        if let Some(url) = self.vision_worker_url {
            config.vision_model.base_url = url;
        }
        if let Some(model_id) = self.vision_model_id {
            config.vision_model.model_id = model_id;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.code_model.timeout_secs = secs;
            config.vision_model.timeout_secs = secs;
        }

        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.log_json {
            config.logging.json = true;
        }
        if let Some(dir) = self.log_dir {
            config.logging.log_dir = Some(dir);
        }
    }
}
