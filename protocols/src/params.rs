//! Generation parameters and the per-task defaults.
//!
//! Bounds are not enforced here; the request layer validates what clients
//! send (see [`crate::api::SamplingOverrides`]).

use serde::{Deserialize, Serialize};

use crate::detail::DetailLevel;

/// Sampling parameters forwarded to the model runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl GenerationParams {
    /// Defaults for the code-generation task.
    pub const fn code_defaults() -> Self {
        Self {
            max_new_tokens: 1500,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
        }
    }

    /// Sampling defaults for the image-description task.
    pub const fn image_defaults() -> Self {
        Self {
            max_new_tokens: 512,
            temperature: 0.5,
            top_p: 0.9,
            top_k: 50,
        }
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}

/// Image-description parameters: sampling plus the requested detail key.
///
/// `detail_level` stays a free string so unknown keys reach the prompt
/// builder and take its fallback instruction instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageGenerationParams {
    #[serde(flatten)]
    pub sampling: GenerationParams,
    pub detail_level: String,
}

impl Default for ImageGenerationParams {
    fn default() -> Self {
        Self {
            sampling: GenerationParams::image_defaults(),
            detail_level: DetailLevel::default().key().to_string(),
        }
    }
}
