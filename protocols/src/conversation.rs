//! Conversation types handed to the model runtimes.
//!
//! The code model and the vision-language model expect different role
//! casing in their chat formats, so each conversation kind carries its own
//! role enumeration: [`ChatRole`] (`system` / `user` / `assistant`) and
//! [`VlRole`] (`User` / `Assistant`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a turn in a code-generation conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a turn in an image-description conversation.
///
/// Serialized capitalized, as the DeepSeek-VL chat format expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VlRole {
    User,
    Assistant,
}

impl VlRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            VlRole::User => "User",
            VlRole::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for VlRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged message of a [`Conversation`].
///
/// Turns are immutable once built; fields are only reachable through the
/// accessors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn<R> {
    role: R,
    content: String,
}

impl<R: Copy> Turn<R> {
    pub fn new(role: R, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> R {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered sequence of turns. Order is the order the runtime receives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Conversation<R> {
    turns: Vec<Turn<R>>,
}

impl<R> Conversation<R> {
    pub fn from_turns(turns: Vec<Turn<R>>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn<R>] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn<R>> {
        self.turns.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn<R>> {
        self.turns.iter()
    }
}

impl<'a, R> IntoIterator for &'a Conversation<R> {
    type Item = &'a Turn<R>;
    type IntoIter = std::slice::Iter<'a, Turn<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// Conversation consumed by the code model's chat template.
pub type CodeConversation = Conversation<ChatRole>;

/// Conversation consumed by the vision-language chat processor.
pub type ImageConversation = Conversation<VlRole>;
