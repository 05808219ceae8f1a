/// Language detection for queries
///
/// Only distinguishes Chinese from everything else, which is all the
/// tokenizer needs to pick a strategy.

use serde::Serialize;

/// Start of the CJK Unified Ideographs block
const CJK_START: char = '\u{4E00}';
/// End of the CJK Unified Ideographs block
const CJK_END: char = '\u{9FFF}';

/// Language tag used to choose a tokenization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageTag {
    Chinese,
    English,
}

impl LanguageTag {
    /// Get the tag as a string
    pub fn name(&self) -> &str {
        match self {
            LanguageTag::Chinese => "chinese",
            LanguageTag::English => "english",
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns true if `ch` is a CJK unified ideograph
pub fn is_cjk(ch: char) -> bool {
    (CJK_START..=CJK_END).contains(&ch)
}

/// Detects the language of a query
pub struct LanguageDetector;

impl LanguageDetector {
    /// Classify a query
    ///
    /// Any CJK ideograph makes the whole query Chinese.
    pub fn detect(query: &str) -> LanguageTag {
        if query.chars().any(is_cjk) {
            LanguageTag::Chinese
        } else {
            LanguageTag::English
        }
    }
}
