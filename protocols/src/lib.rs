//! Data model shared by the prompt builder, the model runtimes and the
//! gateway: conversations, detail levels, generation parameters and the
//! HTTP request/response bodies.

pub mod api;
pub mod conversation;
pub mod detail;
pub mod params;
pub mod validated;

pub use conversation::{
    ChatRole, CodeConversation, Conversation, ImageConversation, Turn, VlRole,
};
pub use detail::{detail_instruction, DetailLevel, FALLBACK_DETAIL_INSTRUCTION};
pub use params::{GenerationParams, ImageGenerationParams};
