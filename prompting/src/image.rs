//! Conversation for the vision-language model.

use multitask_protocol::{detail_instruction, ImageConversation, Turn, VlRole};

/// Marker the vision-language chat processor replaces with image features.
pub const IMAGE_PLACEHOLDER: &str = "<image_placeholder>";

/// Build the two-turn image conversation for a detail key.
///
/// The user turn carries the image marker and the detail instruction; the
/// empty assistant turn tells the runtime where generation starts. Unknown
/// keys use the fallback instruction.
pub fn build_image_conversation(detail_level: &str) -> ImageConversation {
    let instruction = detail_instruction(detail_level);
    ImageConversation::from_turns(vec![
        Turn::new(VlRole::User, format!("{IMAGE_PLACEHOLDER} {instruction}")),
        Turn::new(VlRole::Assistant, ""),
    ])
}
