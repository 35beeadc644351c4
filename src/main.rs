use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use model_runtime::{ChatCompletionsWorker, GenerateWorker};
use multitask::{cli::CliArgs, logging::init_logging, serve, MultiTaskService};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliArgs::parse().into_config()?;
    let _log_guard = init_logging(&config.logging)?;

    info!(
        code_worker = %config.code_model.base_url,
        code_model = %config.code_model.model_id,
        vision_worker = %config.vision_model.base_url,
        vision_model = %config.vision_model.model_id,
        "Starting DeepSeek multi-task gateway"
    );

    let client = reqwest::Client::builder()
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .build()
        .context("failed to build HTTP client")?;

    let code_model = Arc::new(ChatCompletionsWorker::new(
        client.clone(),
        config.code_model.clone(),
    ));
    let vision_model = Arc::new(GenerateWorker::new(client, config.vision_model.clone()));

    serve(
        &config.server,
        MultiTaskService::new(code_model, vision_model),
    )
    .await
}
