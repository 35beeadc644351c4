//! Detail levels for image description.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Instruction used when the requested detail level is not recognised.
///
/// Differs from [`DetailLevel::Detailed`]'s instruction; callers rely on
/// the exact text, so keep both as they are.
pub const FALLBACK_DETAIL_INSTRUCTION: &str = "Describe in detail.";

/// Verbosity tier of an image description.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DetailLevel {
    Concise,
    #[default]
    Detailed,
    Extreme,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::Concise,
        DetailLevel::Detailed,
        DetailLevel::Extreme,
    ];

    /// Key used by clients to select this level.
    pub fn key(&self) -> &'static str {
        match self {
            DetailLevel::Concise => "Concise",
            DetailLevel::Detailed => "Detailed",
            DetailLevel::Extreme => "Extreme",
        }
    }

    /// Canned instruction given to the vision-language model.
    pub fn instruction(&self) -> &'static str {
        match self {
            DetailLevel::Concise => "Describe an image concisely.",
            DetailLevel::Detailed => "Describe an image in detail.",
            DetailLevel::Extreme => "Describe every visible detail exhaustively of this image.",
        }
    }

    /// Exact, case-sensitive key lookup.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.key() == key)
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDetailLevel(pub String);

impl fmt::Display for UnknownDetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown detail level '{}'", self.0)
    }
}

impl std::error::Error for UnknownDetailLevel {}

impl FromStr for DetailLevel {
    type Err = UnknownDetailLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownDetailLevel(s.to_string()))
    }
}

/// Instruction for a client-supplied detail key, falling back to
/// [`FALLBACK_DETAIL_INSTRUCTION`] for anything unrecognised.
pub fn detail_instruction(key: &str) -> &'static str {
    DetailLevel::from_key(key)
        .map(|level| level.instruction())
        .unwrap_or(FALLBACK_DETAIL_INSTRUCTION)
}
