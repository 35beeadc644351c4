//! Output sanitization for raw model text.
//!
//! [`clean`] turns decoded model output into presentable code by stripping
//! prompt echoes, control tokens, reasoning markers and markdown fences.
//! Every function here is total: malformed or partial markers are left in
//! place, never reported.

pub mod passes;

pub use passes::SanitizerPass;
use tracing::trace;

/// Run every [`SanitizerPass`] in order, then trim surrounding whitespace.
pub fn clean(raw_text: &str) -> String {
    let mut text = raw_text.to_string();
    for pass in SanitizerPass::ALL {
        let next = pass.apply(&text).into_owned();
        if next.len() != text.len() {
            trace!(
                pass = pass.name(),
                removed = text.len() - next.len(),
                "Sanitizer pass removed text"
            );
        }
        text = next;
    }
    text.trim().to_string()
}

/// Whitespace-only cleanup, used for image descriptions.
pub fn trim_output(raw_text: &str) -> String {
    raw_text.trim().to_string()
}

/// How a task's raw output is post-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sanitizer {
    /// Full [`clean`] pipeline.
    #[default]
    Code,
    /// [`trim_output`] only.
    TrimOnly,
}

impl Sanitizer {
    pub fn sanitize(&self, raw_text: &str) -> String {
        match self {
            Sanitizer::Code => clean(raw_text),
            Sanitizer::TrimOnly => trim_output(raw_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_empty_and_blank() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\n  "), "");
    }

    #[test]
    fn test_trim_only_keeps_markers() {
        let raw = "  A python curled on a branch.\n```";
        assert_eq!(
            Sanitizer::TrimOnly.sanitize(raw),
            "A python curled on a branch.\n```"
        );
        assert_eq!(Sanitizer::Code.sanitize(raw), "A  curled on a branch.");
    }
}
