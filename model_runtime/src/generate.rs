//! Vision model client for SGLang-style `/generate` workers.

use async_trait::async_trait;
use multitask_protocol::{GenerationParams, ImageConversation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::RuntimeResult,
    http::{post_json, WorkerConfig},
    image::ImageInput,
    template::render_deepseek_vl,
    traits::VisionModel,
};

pub const GENERATE_PATH: &str = "/generate";

#[derive(Debug, Serialize)]
pub(crate) struct SamplingParams {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    skip_special_tokens: bool,
}

impl From<&GenerationParams> for SamplingParams {
    fn from(params: &GenerationParams) -> Self {
        Self {
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            skip_special_tokens: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateBody {
    text: String,
    image_data: String,
    sampling_params: SamplingParams,
    stream: bool,
}

impl GenerateBody {
    pub(crate) fn new(
        conversation: &ImageConversation,
        image: &ImageInput,
        params: &GenerationParams,
    ) -> Self {
        Self {
            text: render_deepseek_vl(conversation),
            image_data: image.to_data_url(),
            sampling_params: params.into(),
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    text: String,
}

/// [`VisionModel`] backed by a `/generate` worker serving DeepSeek-VL.
pub struct GenerateWorker {
    client: reqwest::Client,
    config: WorkerConfig,
}

impl GenerateWorker {
    pub fn new(client: reqwest::Client, config: WorkerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }
}

#[async_trait]
impl VisionModel for GenerateWorker {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    async fn describe(
        &self,
        conversation: &ImageConversation,
        image: &ImageInput,
        params: &GenerationParams,
    ) -> RuntimeResult<String> {
        let url = self.config.endpoint(GENERATE_PATH);
        debug!(
            model = %self.config.model_id,
            width = image.width(),
            height = image.height(),
            mime = image.mime_type(),
            "Sending image to vision worker"
        );

        let body = GenerateBody::new(conversation, image, params);
        let reply: GenerateReply =
            post_json(&self.client, &url, &body, self.config.timeout()).await?;
        Ok(reply.text)
    }
}
