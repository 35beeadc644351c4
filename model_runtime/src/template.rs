//! DeepSeek-VL chat format.
//!
//! Renders an [`ImageConversation`] the way the DeepSeek-VL chat processor
//! does for its `deepseek` format: system prompt, then `Role: content`
//! turns with alternating separators. An empty final turn renders as a bare
//! `Role:` so generation starts right after it.

use multitask_protocol::ImageConversation;

pub const DEEPSEEK_VL_SYSTEM_PROMPT: &str = "You are a helpful language and vision assistant. \
    You are able to understand the visual content that the user provides, \
    and assist the user with a variety of tasks using natural language.";

/// Separators after user and assistant turns respectively.
const SEPARATORS: [&str; 2] = ["\n\n", "<｜end▁of▁sentence｜>"];

pub fn render_deepseek_vl(conversation: &ImageConversation) -> String {
    let mut prompt = String::with_capacity(DEEPSEEK_VL_SYSTEM_PROMPT.len() + 128);
    prompt.push_str(DEEPSEEK_VL_SYSTEM_PROMPT);
    prompt.push_str(SEPARATORS[0]);

    for (i, turn) in conversation.iter().enumerate() {
        prompt.push_str(turn.role().as_str());
        prompt.push(':');
        if !turn.content().is_empty() {
            prompt.push(' ');
            prompt.push_str(turn.content());
            prompt.push_str(SEPARATORS[i % 2]);
        }
    }
    prompt
}
