//! Worker client integration tests
//!
//! Each test spawns an in-process axum worker on an ephemeral port and
//! points a runtime client at it.

use std::{io::Cursor, sync::Arc, time::Duration};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use image::{DynamicImage, ImageFormat, RgbImage};
use model_runtime::{
    ChatCompletionsWorker, CodeModel, GenerateWorker, ImageInput, RuntimeError, VisionModel,
    WorkerConfig, DEEPSEEK_VL_SYSTEM_PROMPT,
};
use multitask_protocol::{GenerationParams, ImageGenerationParams};
use prompt_builder::{build_code_conversation, build_image_conversation};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

type Captured = Arc<Mutex<Option<Value>>>;

async fn spawn_worker(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn capturing_worker(path: &str, reply: Value) -> (Router, Captured) {
    let captured: Captured = Arc::new(Mutex::new(None));
    let router = Router::new()
        .route(
            path,
            post(
                move |State(captured): State<Captured>, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        *captured.lock().await = Some(body);
                        Json(reply)
                    }
                },
            ),
        )
        .with_state(captured.clone());
    (router, captured)
}

fn sample_image() -> ImageInput {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(4, 4))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    ImageInput::from_bytes(buf).unwrap()
}

#[tokio::test]
async fn test_chat_completions_round_trip() {
    let (router, captured) = capturing_worker(
        "/v1/chat/completions",
        json!({
            "id": "cmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "```python\nprint(1)\n```"},
                "finish_reason": "stop"
            }]
        }),
    );
    let base_url = spawn_worker(router).await;
    let worker = ChatCompletionsWorker::new(
        reqwest::Client::new(),
        WorkerConfig::new(base_url, "deepseek-coder"),
    );

    let conversation = build_code_conversation("print one");
    let params = GenerationParams::code_defaults().with_max_new_tokens(256);
    let text = worker.complete(&conversation, &params).await.unwrap();
    assert_eq!(text, "```python\nprint(1)\n```");
    assert_eq!(worker.model_id(), "deepseek-coder");

    let body = captured.lock().await.take().unwrap();
    assert_eq!(body["model"], "deepseek-coder");
    assert_eq!(body["messages"].as_array().unwrap().len(), 4);
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(body["messages"][3]["content"]
        .as_str()
        .unwrap()
        .contains("\"\"\"\nprint one\n\"\"\""));
    assert_eq!(body["max_tokens"], 256);
    assert_eq!(body["continue_final_message"], true);
}

#[tokio::test]
async fn test_chat_completions_without_choices() {
    let (router, _) = capturing_worker("/v1/chat/completions", json!({"choices": []}));
    let base_url = spawn_worker(router).await;
    let worker =
        ChatCompletionsWorker::new(reqwest::Client::new(), WorkerConfig::new(base_url, "m"));

    let err = worker
        .complete(
            &build_code_conversation("x"),
            &GenerationParams::code_defaults(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_generate_round_trip() {
    let (router, captured) =
        capturing_worker("/generate", json!({"text": "  A black square.  ", "meta_info": {}}));
    let base_url = spawn_worker(router).await;
    let worker = GenerateWorker::new(
        reqwest::Client::new(),
        WorkerConfig::new(base_url, "deepseek-vl"),
    );

    let params = ImageGenerationParams::default();
    let conversation = build_image_conversation(&params.detail_level);
    let text = worker
        .describe(&conversation, &sample_image(), &params.sampling)
        .await
        .unwrap();
    // Trimming belongs to the caller
    assert_eq!(text, "  A black square.  ");

    let body = captured.lock().await.take().unwrap();
    let prompt = body["text"].as_str().unwrap();
    assert!(prompt.starts_with(DEEPSEEK_VL_SYSTEM_PROMPT));
    assert!(prompt.ends_with(
        "User: <image_placeholder> Describe an image in detail.\n\nAssistant:"
    ));
    assert!(body["image_data"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert_eq!(body["sampling_params"]["max_new_tokens"], 512);
    assert_eq!(body["sampling_params"]["top_k"], 50);
}

#[tokio::test]
async fn test_worker_error_status_propagates() {
    let router = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model is loading") }),
    );
    let base_url = spawn_worker(router).await;
    let worker = GenerateWorker::new(reqwest::Client::new(), WorkerConfig::new(base_url, "m"));

    let err = worker
        .describe(
            &build_image_conversation("Concise"),
            &sample_image(),
            &GenerationParams::image_defaults(),
        )
        .await
        .unwrap_err();
    match err {
        RuntimeError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model is loading");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_worker_timeout() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"choices": []}))
        }),
    );
    let base_url = spawn_worker(router).await;
    let worker = ChatCompletionsWorker::new(
        reqwest::Client::new(),
        WorkerConfig::new(base_url, "m").with_timeout_secs(1),
    );

    let err = worker
        .complete(
            &build_code_conversation("x"),
            &GenerationParams::code_defaults(),
        )
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn test_unreachable_worker() {
    // Grab a free port, then close it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let worker = ChatCompletionsWorker::new(
        reqwest::Client::new(),
        WorkerConfig::new(format!("http://{addr}"), "m"),
    );
    let err = worker
        .complete(
            &build_code_conversation("x"),
            &GenerationParams::code_defaults(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Connection { .. }));
}
