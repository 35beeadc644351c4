//! Common test utilities for gateway tests

use std::{
    io::Cursor,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat, RgbImage};
use model_runtime::{CodeModel, ImageInput, RuntimeError, RuntimeResult, VisionModel};
use multitask::{build_app, AppState, MultiTaskService};
use multitask_protocol::{CodeConversation, GenerationParams, ImageConversation};

/// Canned reply of a mock model.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Reply {
    Text(&'static str),
    Status(u16, &'static str),
    Timeout,
}

impl Reply {
    fn into_result(self) -> RuntimeResult<String> {
        match self {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Status(status, body) => Err(RuntimeError::Status {
                status,
                body: body.to_string(),
            }),
            Reply::Timeout => Err(RuntimeError::Timeout {
                url: "http://mock-worker".to_string(),
            }),
        }
    }
}

pub struct MockCodeModel {
    pub reply: Reply,
    pub last_params: Mutex<Option<GenerationParams>>,
}

#[async_trait]
impl CodeModel for MockCodeModel {
    fn model_id(&self) -> &str {
        "mock-coder"
    }

    async fn complete(
        &self,
        _conversation: &CodeConversation,
        params: &GenerationParams,
    ) -> RuntimeResult<String> {
        *self.last_params.lock().unwrap() = Some(*params);
        self.reply.clone().into_result()
    }
}

pub struct MockVisionModel {
    pub reply: Reply,
    pub last_prompt: Mutex<Option<String>>,
    pub last_params: Mutex<Option<GenerationParams>>,
}

#[async_trait]
impl VisionModel for MockVisionModel {
    fn model_id(&self) -> &str {
        "mock-vl"
    }

    async fn describe(
        &self,
        conversation: &ImageConversation,
        _image: &ImageInput,
        params: &GenerationParams,
    ) -> RuntimeResult<String> {
        let prompt = conversation.turns()[0].content().to_string();
        *self.last_prompt.lock().unwrap() = Some(prompt);
        *self.last_params.lock().unwrap() = Some(*params);
        self.reply.clone().into_result()
    }
}

pub struct TestApp {
    pub router: Router,
    pub code_model: Arc<MockCodeModel>,
    pub vision_model: Arc<MockVisionModel>,
}

pub fn test_app(code_reply: Reply, vision_reply: Reply) -> TestApp {
    let code_model = Arc::new(MockCodeModel {
        reply: code_reply,
        last_params: Mutex::new(None),
    });
    let vision_model = Arc::new(MockVisionModel {
        reply: vision_reply,
        last_prompt: Mutex::new(None),
        last_params: Mutex::new(None),
    });
    let service = MultiTaskService::new(code_model.clone(), vision_model.clone());
    TestApp {
        router: build_app(AppState::new(service), 1024 * 1024),
        code_model,
        vision_model,
    }
}

/// A small PNG, base64 encoded.
pub fn png_base64() -> String {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(8, 8))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    STANDARD.encode(buf)
}
