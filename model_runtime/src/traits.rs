//! Model runtime seam.
//!
//! The gateway holds one handle per model and passes it explicitly to the
//! service; implementations own the chat-template rendering, sampling and
//! decoding for their model.

use async_trait::async_trait;
use multitask_protocol::{CodeConversation, GenerationParams, ImageConversation};

use crate::{error::RuntimeResult, image::ImageInput};

/// Causal language model used for code generation.
#[async_trait]
pub trait CodeModel: Send + Sync {
    /// Identifier reported back to clients.
    fn model_id(&self) -> &str;

    /// Generate a continuation for `conversation`, returning raw decoded text.
    async fn complete(
        &self,
        conversation: &CodeConversation,
        params: &GenerationParams,
    ) -> RuntimeResult<String>;
}

/// Vision-language model used for image description.
#[async_trait]
pub trait VisionModel: Send + Sync {
    fn model_id(&self) -> &str;

    /// Describe `image` following `conversation`, returning raw decoded text.
    async fn describe(
        &self,
        conversation: &ImageConversation,
        image: &ImageInput,
        params: &GenerationParams,
    ) -> RuntimeResult<String>;
}
