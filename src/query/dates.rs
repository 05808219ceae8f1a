/// Natural-language date parsing
///
/// Turns phrases like "last 3 days" or "yesterday" into a concrete date
/// range relative to an injected `today`. Rules are checked in a fixed
/// order and the first one that matches wins.

use crate::error::Result;
use chrono::{Days, NaiveDate};
use regex::Regex;

const LAST_N_DAYS_PATTERN: &str = r"last (\d+) days?";
const ISO_DATE_PATTERN: &str = r"\d{4}-\d{2}-\d{2}";

const WEEK_PHRASES: &[&str] = &["recent week", "last week", "past week"];
const MONTH_PHRASES: &[&str] = &["recent month", "last month", "past month"];

/// A month is always 30 days here, not a calendar month
const MONTH_DAYS: u64 = 30;
const WEEK_DAYS: u64 = 7;

/// Inclusive date range detected in a query
///
/// Both ends `None` means the query carries no date constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// No date constraint
    pub fn none() -> Self {
        Self::default()
    }

    /// A single calendar day
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: Some(date),
            end: Some(date),
        }
    }

    /// A span ending on `end`
    pub fn span(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end);
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_none(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_single_day(&self) -> bool {
        self.start.is_some() && self.start == self.end
    }
}

/// One entry in the ordered rule list
enum DateRule {
    /// "last N days"
    LastNDays,
    /// Any of `phrases` means the `days` leading up to today
    Span {
        phrases: &'static [&'static str],
        days: u64,
    },
    /// `phrase` means the single day `days` before today
    DaysAgo { phrase: &'static str, days: u64 },
    /// A literal YYYY-MM-DD somewhere in the query
    Literal,
}

const RULES: &[DateRule] = &[
    DateRule::LastNDays,
    DateRule::Span {
        phrases: WEEK_PHRASES,
        days: WEEK_DAYS,
    },
    DateRule::Span {
        phrases: MONTH_PHRASES,
        days: MONTH_DAYS,
    },
    DateRule::DaysAgo {
        phrase: "yesterday",
        days: 1,
    },
    DateRule::DaysAgo {
        phrase: "today",
        days: 0,
    },
    DateRule::Literal,
];

/// Parses natural-language date expressions
pub struct DateExpressionParser {
    last_n_days: Regex,
    iso_date: Regex,
}

impl DateExpressionParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            last_n_days: Regex::new(LAST_N_DAYS_PATTERN)?,
            iso_date: Regex::new(ISO_DATE_PATTERN)?,
        })
    }

    /// Parse the first date expression found in `query`
    ///
    /// # Arguments
    /// * `query` - Raw query text, matched case-insensitively
    /// * `today` - The reference day, computed once by the caller
    ///
    /// # Returns
    /// * `DateRange::none()` when nothing matches
    pub fn parse(&self, query: &str, today: NaiveDate) -> DateRange {
        let lower = query.to_lowercase();

        RULES
            .iter()
            .find_map(|rule| self.apply(rule, &lower, today))
            .unwrap_or_default()
    }

    fn apply(&self, rule: &DateRule, query: &str, today: NaiveDate) -> Option<DateRange> {
        match rule {
            DateRule::LastNDays => {
                let caps = self.last_n_days.captures(query)?;
                // Absurdly large N falls through to the next rule
                let days: u64 = caps[1].parse().ok()?;
                let start = today.checked_sub_days(Days::new(days))?;
                Some(DateRange::span(start, today))
            }
            DateRule::Span { phrases, days } => {
                if phrases.iter().any(|p| query.contains(p)) {
                    let start = today.checked_sub_days(Days::new(*days))?;
                    Some(DateRange::span(start, today))
                } else {
                    None
                }
            }
            DateRule::DaysAgo { phrase, days } => {
                if query.contains(phrase) {
                    today.checked_sub_days(Days::new(*days)).map(DateRange::day)
                } else {
                    None
                }
            }
            DateRule::Literal => self
                .iso_date
                .find_iter(query)
                .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
                .map(DateRange::day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(query: &str) -> DateRange {
        DateExpressionParser::new().unwrap().parse(query, today())
    }

    #[test]
    fn test_last_n_days() {
        assert_eq!(parse("last 3 days"), DateRange::span(date(2024, 3, 17), today()));
        assert_eq!(parse("notes from LAST 1 day"), DateRange::span(date(2024, 3, 19), today()));
        assert_eq!(parse("last 0 days"), DateRange::day(today()));
    }

    #[test]
    fn test_last_n_days_beats_week() {
        // Both rule 1 and rule 2 could apply; rule 1 wins
        assert_eq!(
            parse("last 2 days or last week"),
            DateRange::span(date(2024, 3, 18), today())
        );
    }

    #[test]
    fn test_week_and_month_phrases() {
        let week = DateRange::span(date(2024, 3, 13), today());
        assert_eq!(parse("recent week psychology"), week);
        assert_eq!(parse("Past Week"), week);

        // 30 days, not a calendar month
        let month = DateRange::span(date(2024, 2, 19), today());
        assert_eq!(parse("last month"), month);
        assert_eq!(parse("recent month reading"), month);
    }

    #[test]
    fn test_week_beats_yesterday() {
        assert_eq!(
            parse("yesterday and last week"),
            DateRange::span(date(2024, 3, 13), today())
        );
    }

    #[test]
    fn test_yesterday_and_today() {
        assert_eq!(parse("yesterday"), DateRange::day(date(2024, 3, 19)));
        assert_eq!(parse("what did I write today"), DateRange::day(today()));
    }

    #[test]
    fn test_literal_date() {
        assert_eq!(parse("meeting 2024-03-15"), DateRange::day(date(2024, 3, 15)));
        // Relative phrases outrank literals
        assert_eq!(parse("today vs 2024-03-15"), DateRange::day(today()));
    }

    #[test]
    fn test_invalid_literal_is_skipped() {
        assert!(parse("build 2024-13-45").is_none());
        assert_eq!(
            parse("2024-13-45 then 2024-01-02"),
            DateRange::day(date(2024, 1, 2))
        );
    }

    #[test]
    fn test_no_date() {
        let range = parse("no date here");
        assert!(range.is_none());
        assert_eq!(range, DateRange::none());
    }

    #[test]
    fn test_range_invariants() {
        for q in ["last 10 days", "last week", "last month", "yesterday", "today"] {
            let range = parse(q);
            assert!(range.start.unwrap() <= range.end.unwrap(), "{q}");
        }
        assert!(parse("yesterday").is_single_day());
        assert!(!parse("last week").is_single_day());
    }
}
