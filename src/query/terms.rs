// Pulls search terms out of a query
//
// CJK text has no spaces, so Chinese queries are split on runs of ideographs.
// Everything else is split on alphanumeric runs, dropping anything under
// three characters (too many false hits against a full-text grep).

use crate::error::Result;
use crate::query::LanguageTag;
use regex::Regex;

// Two or more consecutive CJK unified ideographs
const CJK_RUN_PATTERN: &str = r"[\x{4E00}-\x{9FFF}]{2,}";

// ASCII letters/digits, at least 3 long
const WORD_PATTERN: &str = r"[A-Za-z0-9]{3,}";

pub struct TermExtractor {
    cjk_run: Regex,
    word: Regex,
}

impl TermExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cjk_run: Regex::new(CJK_RUN_PATTERN)?,
            word: Regex::new(WORD_PATTERN)?,
        })
    }

    /// Extract search terms in order of appearance
    ///
    /// Duplicates are kept; results get deduplicated later, terms don't.
    pub fn extract(&self, query: &str, lang: LanguageTag) -> Vec<String> {
        match lang {
            LanguageTag::Chinese => {
                let runs = Self::find_all(&self.cjk_run, query);
                if !runs.is_empty() {
                    return runs;
                }
                // Mixed-script query without a usable CJK run
                Self::find_all(&self.word, query)
            }
            LanguageTag::English => Self::find_all(&self.word, &query.to_lowercase()),
        }
    }

    fn find_all(regex: &Regex, text: &str) -> Vec<String> {
        regex.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TermExtractor {
        TermExtractor::new().unwrap()
    }

    #[test]
    fn test_english_drops_short_runs() {
        let terms = extractor().extract("find 3-2-1 technique", LanguageTag::English);
        assert_eq!(terms, vec!["find", "technique"]);
        assert!(terms.iter().all(|t| t.chars().count() >= 3));
    }

    #[test]
    fn test_english_lowercases() {
        let terms = extractor().extract("Recent Week PSYCHOLOGY", LanguageTag::English);
        assert_eq!(terms, vec!["recent", "week", "psychology"]);
    }

    #[test]
    fn test_english_keeps_duplicates() {
        let terms = extractor().extract("rust and Rust", LanguageTag::English);
        assert_eq!(terms, vec!["rust", "and", "rust"]);
    }

    #[test]
    fn test_chinese_runs() {
        let terms = extractor().extract("找3-2-1技巧 心理学笔记", LanguageTag::Chinese);
        assert_eq!(terms, vec!["技巧", "心理学笔记"]);
    }

    #[test]
    fn test_chinese_single_char_falls_back_to_words() {
        // "找" is a lone ideograph, so no CJK run qualifies
        let terms = extractor().extract("找 Zettelkasten notes", LanguageTag::Chinese);
        assert_eq!(terms, vec!["Zettelkasten", "notes"]);
    }

    #[test]
    fn test_no_terms() {
        assert!(extractor().extract("a b c", LanguageTag::English).is_empty());
        assert!(extractor().extract("", LanguageTag::Chinese).is_empty());
    }
}
