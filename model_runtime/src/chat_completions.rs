//! Code model client for OpenAI-compatible chat completion workers.
//!
//! The worker applies the model's own chat template. The request asks it to
//! continue the final user turn instead of opening an assistant turn, and to
//! drop special tokens while decoding.

use async_trait::async_trait;
use multitask_protocol::{CodeConversation, GenerationParams};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{RuntimeError, RuntimeResult},
    http::{post_json, WorkerConfig},
    traits::CodeModel,
};

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a CodeConversation,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    stream: bool,
    continue_final_message: bool,
    add_generation_prompt: bool,
    skip_special_tokens: bool,
}

impl<'a> ChatCompletionBody<'a> {
    pub(crate) fn new(
        model: &'a str,
        messages: &'a CodeConversation,
        params: &GenerationParams,
    ) -> Self {
        Self {
            model,
            messages,
            max_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            stream: false,
            continue_final_message: true,
            add_generation_prompt: false,
            skip_special_tokens: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`CodeModel`] backed by a `/v1/chat/completions` worker.
pub struct ChatCompletionsWorker {
    client: reqwest::Client,
    config: WorkerConfig,
}

impl ChatCompletionsWorker {
    pub fn new(client: reqwest::Client, config: WorkerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }
}

#[async_trait]
impl CodeModel for ChatCompletionsWorker {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    async fn complete(
        &self,
        conversation: &CodeConversation,
        params: &GenerationParams,
    ) -> RuntimeResult<String> {
        let url = self.config.endpoint(CHAT_COMPLETIONS_PATH);
        let body = ChatCompletionBody::new(&self.config.model_id, conversation, params);

        let reply: ChatCompletionReply =
            post_json(&self.client, &url, &body, self.config.timeout()).await?;

        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RuntimeError::InvalidResponse("response has no choices".into()))?;
        let text = choice.message.content.unwrap_or_default();

        debug!(
            model = %self.config.model_id,
            chars = text.len(),
            "Code completion received"
        );
        Ok(text)
    }
}
