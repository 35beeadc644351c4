//! Individual sanitizer passes.
//!
//! Each pass is one regex removal over the whole text. [`SanitizerPass::ALL`]
//! lists them in the order [`crate::clean`] applies them; fence removal has
//! to run before the dangling language tag pass because removing a fence is
//! what leaves the tag behind.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static IMPORTS_ECHO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Include any necessary imports and ensure the snippet is functional\.?\s*")
        .unwrap()
});
static SPECIAL_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<\|.*?\|>").unwrap());
static THINK_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?think>").unwrap());
static CODE_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```\s*(python)?\s*|```").unwrap());
static LANGUAGE_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bpython\b").unwrap());
static EDGE_BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\s*\n+|\n+\s*\z").unwrap());

/// One removal rule of the output sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanitizerPass {
    /// The prompt's closing instruction parroted back by the model.
    ImportsEcho,
    /// `<|...|>` control tokens, including ones spanning lines.
    SpecialTokens,
    /// `<think>` / `</think>` markers. The reasoning text between them stays.
    ThinkTags,
    /// Triple-backtick fences with an optional `python` tag.
    CodeFences,
    /// A bare `python` word left over after fence removal.
    LanguageTag,
    /// Blank lines at the very start and end of the text.
    EdgeBlankLines,
}

impl SanitizerPass {
    /// All passes, in application order.
    pub const ALL: [SanitizerPass; 6] = [
        SanitizerPass::ImportsEcho,
        SanitizerPass::SpecialTokens,
        SanitizerPass::ThinkTags,
        SanitizerPass::CodeFences,
        SanitizerPass::LanguageTag,
        SanitizerPass::EdgeBlankLines,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SanitizerPass::ImportsEcho => "imports_echo",
            SanitizerPass::SpecialTokens => "special_tokens",
            SanitizerPass::ThinkTags => "think_tags",
            SanitizerPass::CodeFences => "code_fences",
            SanitizerPass::LanguageTag => "language_tag",
            SanitizerPass::EdgeBlankLines => "edge_blank_lines",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            SanitizerPass::ImportsEcho => &IMPORTS_ECHO_RE,
            SanitizerPass::SpecialTokens => &SPECIAL_TOKEN_RE,
            SanitizerPass::ThinkTags => &THINK_TAG_RE,
            SanitizerPass::CodeFences => &CODE_FENCE_RE,
            SanitizerPass::LanguageTag => &LANGUAGE_TAG_RE,
            SanitizerPass::EdgeBlankLines => &EDGE_BLANK_LINES_RE,
        }
    }

    /// Run this pass alone. Borrows the input when nothing matched.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.regex().replace_all(text, "")
    }
}
