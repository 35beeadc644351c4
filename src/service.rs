//! Task orchestration: prompt construction, model call, output cleanup.

use std::sync::Arc;

use model_runtime::{CodeModel, ImageInput, VisionModel};
use multitask_protocol::{GenerationParams, ImageGenerationParams};
use output_sanitizer::Sanitizer;
use prompt_builder::{build_code_conversation, build_image_conversation};
use tracing::{debug, instrument};

use crate::error::ServiceError;

/// Both tasks of the gateway, bound to the model handles they run on.
#[derive(Clone)]
pub struct MultiTaskService {
    code_model: Arc<dyn CodeModel>,
    vision_model: Arc<dyn VisionModel>,
}

impl std::fmt::Debug for MultiTaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiTaskService")
            .field("code_model", &self.code_model.model_id())
            .field("vision_model", &self.vision_model.model_id())
            .finish()
    }
}

impl MultiTaskService {
    pub fn new(code_model: Arc<dyn CodeModel>, vision_model: Arc<dyn VisionModel>) -> Self {
        Self {
            code_model,
            vision_model,
        }
    }

    pub fn code_model_id(&self) -> &str {
        self.code_model.model_id()
    }

    pub fn vision_model_id(&self) -> &str {
        self.vision_model.model_id()
    }

    /// Generate a Python snippet for `prompt` and return it without markdown
    /// fences, control tokens or prompt echoes.
    #[instrument(skip_all, fields(model = %self.code_model.model_id()))]
    pub async fn generate_code_snippet(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ServiceError> {
        let conversation = build_code_conversation(prompt);
        let raw = self.code_model.complete(&conversation, params).await?;
        debug!(raw_len = raw.len(), "Code model returned");
        Ok(Sanitizer::Code.sanitize(&raw))
    }

    /// Describe `image` at the requested detail level.
    ///
    /// Descriptions are only trimmed; the code cleanup would strip words
    /// such as "python" from ordinary prose.
    #[instrument(skip_all, fields(model = %self.vision_model.model_id(), detail_level = %params.detail_level))]
    pub async fn describe_image(
        &self,
        image: &ImageInput,
        params: &ImageGenerationParams,
    ) -> Result<String, ServiceError> {
        let conversation = build_image_conversation(&params.detail_level);
        let raw = self
            .vision_model
            .describe(&conversation, image, &params.sampling)
            .await?;
        debug!(raw_len = raw.len(), "Vision model returned");
        Ok(Sanitizer::TrimOnly.sanitize(&raw))
    }
}
