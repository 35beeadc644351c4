use std::{sync::Arc, time::Instant};

use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use model_runtime::ImageInput;
use multitask_protocol::{
    api::{CodeGenerationRequest, GenerationResponse, ImageDescriptionRequest, InfoResponse},
    validated::ValidatedJson,
    GenerationParams, ImageGenerationParams,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::{ServerConfig, APP_DESCRIPTION, APP_TITLE},
    error::ServiceError,
    service::MultiTaskService,
};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MultiTaskService>,
}

impl AppState {
    pub fn new(service: MultiTaskService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn build_app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/info", get(info_handler))
        .route("/v1/code/generate", post(generate_code))
        .route("/v1/image/describe", post(describe_image))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

async fn info_handler(State(state): State<AppState>) -> Response {
    Json(InfoResponse {
        title: APP_TITLE.to_string(),
        description: APP_DESCRIPTION.to_string(),
        code_model: state.service.code_model_id().to_string(),
        vision_model: state.service.vision_model_id().to_string(),
        code_defaults: GenerationParams::code_defaults(),
        image_defaults: ImageGenerationParams::default(),
        detail_levels: InfoResponse::detail_level_keys(),
    })
    .into_response()
}

async fn generate_code(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CodeGenerationRequest>,
) -> Result<Json<GenerationResponse>, ServiceError> {
    let started = Instant::now();
    let params = request.params();

    let text = state
        .service
        .generate_code_snippet(&request.prompt, &params)
        .await
        .inspect_err(|e| warn!(error = %e, "Code generation failed"))?;

    let elapsed_ms = elapsed_ms(started);
    info!(elapsed_ms, output_len = text.len(), "Code generation finished");
    Ok(Json(GenerationResponse {
        id: generation_id(),
        model: state.service.code_model_id().to_string(),
        text,
        elapsed_ms,
    }))
}

async fn describe_image(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ImageDescriptionRequest>,
) -> Result<Json<GenerationResponse>, ServiceError> {
    let started = Instant::now();
    let params = request.params();

    // Decoding a large image is CPU bound
    let payload = request.image;
    let image = tokio::task::spawn_blocking(move || ImageInput::from_base64(&payload))
        .await
        .map_err(|e| ServiceError::Internal(format!("image decode task failed: {e}")))?
        .inspect_err(|e| warn!(error = %e, "Rejected image payload"))?;

    let text = state
        .service
        .describe_image(&image, &params)
        .await
        .inspect_err(|e| warn!(error = %e, "Image description failed"))?;

    let elapsed_ms = elapsed_ms(started);
    info!(
        elapsed_ms,
        width = image.width(),
        height = image.height(),
        "Image description finished"
    );
    Ok(Json(GenerationResponse {
        id: generation_id(),
        model: state.service.vision_model_id().to_string(),
        text,
        elapsed_ms,
    }))
}

fn generation_id() -> String {
    format!("gen-{}", Uuid::new_v4().simple())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Bind `config.host:config.port` and serve until Ctrl+C.
pub async fn serve(config: &ServerConfig, service: MultiTaskService) -> anyhow::Result<()> {
    let app = build_app(AppState::new(service), config.max_body_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
