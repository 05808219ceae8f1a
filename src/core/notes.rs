/// Note search pipeline
///
/// Turns a free-text query into a list of note files: a date pass keyed on
/// the `created:` metadata line, then one pass per extracted term. Hits
/// from every pass are merged (a union, not an intersection) and
/// deduplicated in first-seen order.

use crate::core::executor::{SearchExecutor, SearchFlag};
use crate::core::fallback;
use crate::error::{Result, VaultSearchError};
use crate::query::{DateExpressionParser, DateRange, LanguageDetector, LanguageTag, TermExtractor};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Handles note searching
pub struct NoteSearch {
    executor: Arc<SearchExecutor>,
    terms: TermExtractor,
    dates: DateExpressionParser,
}

impl NoteSearch {
    /// Create a new note search instance
    pub fn new(executor: Arc<SearchExecutor>) -> Result<Self> {
        Ok(Self {
            executor,
            terms: TermExtractor::new()?,
            dates: DateExpressionParser::new()?,
        })
    }

    /// Search notes for a query
    ///
    /// # Arguments
    /// * `query` - Free-text query, may contain date phrases
    /// * `root` - Vault directory
    /// * `today` - Reference day for relative dates
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Vault-relative paths, unique, in first-seen order
    /// * `Err(VaultSearchError::EmptyQuery)` - If the query is blank
    pub async fn search(&self, query: &str, root: &Path, today: NaiveDate) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            return Err(VaultSearchError::EmptyQuery);
        }

        let language = LanguageDetector::detect(query);
        let terms = self.terms.extract(query, language);
        let range = self.dates.parse(query, today);

        debug!(%language, ?terms, ?range, "note query interpreted");

        let mut results = self.search_by_date(&range, root).await;

        for term in &terms {
            let pattern = term_pattern(term, language);
            let hits = self
                .executor
                .run(
                    &pattern,
                    root,
                    &[SearchFlag::FilesWithMatches, SearchFlag::IgnoreCase],
                )
                .await;
            results.extend(hits);
        }

        Ok(dedup_preserving_order(results))
    }

    /// Date pass, with the modification-time fallback
    async fn search_by_date(&self, range: &DateRange, root: &Path) -> Vec<String> {
        let Some(start) = range.start else {
            return Vec::new();
        };
        let end = range.end.unwrap_or(start);

        let pattern = created_pattern(range, start);
        let hits = self
            .executor
            .run(&pattern, root, &[SearchFlag::FilesWithMatches])
            .await;

        if !hits.is_empty() {
            return hits;
        }

        debug!(%start, %end, "no created: metadata hits, falling back to mtime");
        fallback::modified_between(root, self.executor.extension(), start, end)
    }
}

/// Pattern for the `created:` metadata line
///
/// A single day matches exactly; a range only matches the start's
/// year-month prefix.
fn created_pattern(range: &DateRange, start: NaiveDate) -> String {
    if range.is_single_day() {
        format!("created: {}", start.format("%Y-%m-%d"))
    } else {
        format!("created: {}", start.format("%Y-%m"))
    }
}

/// Pattern for one term
///
/// CJK has no word boundaries, so Chinese queries search terms literally.
fn term_pattern(term: &str, language: LanguageTag) -> String {
    let escaped = regex::escape(term);
    match language {
        LanguageTag::Chinese => escaped,
        LanguageTag::English => format!(r"\b{}\b", escaped),
    }
}

/// Drop blanks and repeats, keeping the first occurrence
fn dedup_preserving_order(results: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| !r.trim().is_empty())
        .filter(|r| seen.insert(r.clone()))
        .collect()
}
