//! Prompt construction for the code and image tasks.
//!
//! Both builders are pure and total: any input string yields a conversation.

pub mod code;
pub mod image;

pub use code::{build_code_conversation, code_request_prompt, IMPORTS_INSTRUCTION};
pub use image::{build_image_conversation, IMAGE_PLACEHOLDER};
