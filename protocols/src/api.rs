//! HTTP request and response bodies for the gateway endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    detail::DetailLevel,
    params::{GenerationParams, ImageGenerationParams},
    validated::Normalizable,
};

// ============================================================================
// Request Types
// ============================================================================

/// Per-request overrides of the task defaults. Omitted fields keep the default.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SamplingOverrides {
    #[validate(range(
        min = 100,
        max = 2048,
        message = "max_new_tokens must be between 100 and 2048"
    ))]
    pub max_new_tokens: Option<u32>,

    #[validate(range(
        min = 0.1,
        max = 1.0,
        message = "temperature must be between 0.1 and 1.0"
    ))]
    pub temperature: Option<f32>,

    #[validate(range(min = 0.1, max = 1.0, message = "top_p must be between 0.1 and 1.0"))]
    pub top_p: Option<f32>,

    #[validate(range(min = 1, max = 100, message = "top_k must be between 1 and 100"))]
    pub top_k: Option<u32>,
}

impl SamplingOverrides {
    /// Apply the overrides on top of `base`.
    pub fn apply(&self, base: GenerationParams) -> GenerationParams {
        let mut params = base;
        if let Some(v) = self.max_new_tokens {
            params = params.with_max_new_tokens(v);
        }
        if let Some(v) = self.temperature {
            params = params.with_temperature(v);
        }
        if let Some(v) = self.top_p {
            params = params.with_top_p(v);
        }
        if let Some(v) = self.top_k {
            params = params.with_top_k(v);
        }
        params
    }
}

/// Body of `POST /v1/code/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CodeGenerationRequest {
    /// Natural-language description of the wanted snippet. Passed verbatim.
    pub prompt: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub sampling: SamplingOverrides,
}

impl Normalizable for CodeGenerationRequest {
    // The prompt is forwarded verbatim, nothing to normalize
}

impl CodeGenerationRequest {
    pub fn params(&self) -> GenerationParams {
        self.sampling.apply(GenerationParams::code_defaults())
    }
}

/// Body of `POST /v1/image/describe`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImageDescriptionRequest {
    /// Base64 image payload, bare or as a `data:` URL.
    #[validate(length(min = 1, message = "image is required and cannot be empty"))]
    pub image: String,

    /// One of `Concise`, `Detailed`, `Extreme`. Unknown keys are accepted.
    pub detail_level: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub sampling: SamplingOverrides,
}

impl Normalizable for ImageDescriptionRequest {
    fn normalize(&mut self) {
        let trimmed = self.image.trim();
        if trimmed.len() != self.image.len() {
            self.image = trimmed.to_string();
        }
    }
}

impl ImageDescriptionRequest {
    pub fn params(&self) -> ImageGenerationParams {
        let defaults = ImageGenerationParams::default();
        ImageGenerationParams {
            sampling: self.sampling.apply(defaults.sampling),
            detail_level: self
                .detail_level
                .clone()
                .unwrap_or(defaults.detail_level),
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Result of either generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResponse {
    pub id: String,
    pub model: String,
    pub text: String,
    pub elapsed_ms: u64,
}

/// Body of `GET /v1/info`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfoResponse {
    pub title: String,
    pub description: String,
    pub code_model: String,
    pub vision_model: String,
    pub code_defaults: GenerationParams,
    pub image_defaults: ImageGenerationParams,
    pub detail_levels: Vec<String>,
}

impl InfoResponse {
    pub fn detail_level_keys() -> Vec<String> {
        DetailLevel::ALL
            .iter()
            .map(|level| level.key().to_string())
            .collect()
    }
}
