/// Search intent classification
///
/// Decides whether a query is about notes or tasks, and for tasks which
/// kind of task list is wanted. Both are ordered keyword rules where the
/// first match wins.

use chrono::NaiveDate;
use serde::Serialize;

/// Keywords that route a query to task search
const TASK_KEYWORDS: &[&str] = &["task", "todo", "due", "overdue", "priority"];

/// Incomplete checklist item at the start of a line
const OPEN_TASK: &str = r"^- \[ \]";

/// Date annotation marker
pub const DUE_MARKER: &str = "📅";
pub const HIGH_PRIORITY_MARKER: &str = "⏫";
pub const MEDIUM_PRIORITY_MARKER: &str = "🔼";
pub const LOW_PRIORITY_MARKER: &str = "🔽";

/// Which pipeline should handle a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Notes,
    Tasks,
}

impl SearchMode {
    /// Route a query by keyword
    pub fn classify(query: &str) -> SearchMode {
        let lower = query.to_lowercase();
        if TASK_KEYWORDS.iter().any(|k| lower.contains(k)) {
            SearchMode::Tasks
        } else {
            SearchMode::Notes
        }
    }
}

/// What kind of task list a query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskIntent {
    DueToday,
    Overdue,
    HighPriority,
    AnyPriority,
    All,
}

/// Ordered (keyword, intent) rules; "high priority" must precede "priority"
const INTENT_RULES: &[(&str, TaskIntent)] = &[
    ("due today", TaskIntent::DueToday),
    ("overdue", TaskIntent::Overdue),
    ("high priority", TaskIntent::HighPriority),
    ("priority", TaskIntent::AnyPriority),
];

impl TaskIntent {
    /// Classify a task query, falling back to `All`
    pub fn classify(query: &str) -> TaskIntent {
        let lower = query.to_lowercase();
        INTENT_RULES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, intent)| *intent)
            .unwrap_or(TaskIntent::All)
    }

    /// Build the ripgrep pattern for this intent
    ///
    /// `Overdue` matches any dated task; the real filtering happens after
    /// the search since the engine can't compare dates.
    pub fn pattern(&self, today: NaiveDate) -> String {
        match self {
            TaskIntent::DueToday => format!(
                "{OPEN_TASK}.*{DUE_MARKER} {}",
                today.format("%Y-%m-%d")
            ),
            TaskIntent::Overdue => format!(r"{OPEN_TASK}.*{DUE_MARKER} \d{{4}}-\d{{2}}-\d{{2}}"),
            TaskIntent::HighPriority => format!("{OPEN_TASK}.*{HIGH_PRIORITY_MARKER}"),
            TaskIntent::AnyPriority => format!(
                "{OPEN_TASK}.*[{HIGH_PRIORITY_MARKER}{MEDIUM_PRIORITY_MARKER}{LOW_PRIORITY_MARKER}]"
            ),
            TaskIntent::All => OPEN_TASK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_search_mode() {
        assert_eq!(SearchMode::classify("tasks due today"), SearchMode::Tasks);
        assert_eq!(SearchMode::classify("TODO list"), SearchMode::Tasks);
        assert_eq!(SearchMode::classify("high priority"), SearchMode::Tasks);
        assert_eq!(SearchMode::classify("recent week psychology"), SearchMode::Notes);
        assert_eq!(SearchMode::classify("找3-2-1技巧"), SearchMode::Notes);
    }

    #[test]
    fn test_intent_precedence() {
        assert_eq!(TaskIntent::classify("tasks due today"), TaskIntent::DueToday);
        // "due today" wins even if "overdue" is also present
        assert_eq!(TaskIntent::classify("overdue or due today"), TaskIntent::DueToday);
        assert_eq!(TaskIntent::classify("Overdue tasks"), TaskIntent::Overdue);
        assert_eq!(TaskIntent::classify("high priority tasks"), TaskIntent::HighPriority);
        assert_eq!(TaskIntent::classify("overdue high priority"), TaskIntent::Overdue);
        assert_eq!(TaskIntent::classify("priority tasks"), TaskIntent::AnyPriority);
        assert_eq!(TaskIntent::classify("all my tasks"), TaskIntent::All);
    }

    #[test]
    fn test_patterns_match_open_tasks_only() {
        let all = Regex::new(&TaskIntent::All.pattern(today())).unwrap();
        assert!(all.is_match("- [ ] write report"));
        assert!(!all.is_match("- [x] write report"));
        assert!(!all.is_match("  text - [ ] not at start"));
    }

    #[test]
    fn test_due_today_pattern() {
        let re = Regex::new(&TaskIntent::DueToday.pattern(today())).unwrap();
        assert!(re.is_match("- [ ] pay rent 📅 2024-06-01"));
        assert!(!re.is_match("- [ ] pay rent 📅 2024-06-02"));
    }

    #[test]
    fn test_overdue_pattern() {
        let re = Regex::new(&TaskIntent::Overdue.pattern(today())).unwrap();
        assert!(re.is_match("- [ ] pay rent 📅 2020-01-01"));
        assert!(!re.is_match("- [ ] pay rent"));
    }

    #[test]
    fn test_priority_patterns() {
        let high = Regex::new(&TaskIntent::HighPriority.pattern(today())).unwrap();
        let any = Regex::new(&TaskIntent::AnyPriority.pattern(today())).unwrap();

        assert!(high.is_match("- [ ] ship it ⏫"));
        assert!(!high.is_match("- [ ] ship it 🔼"));
        assert!(any.is_match("- [ ] ship it 🔼"));
        assert!(any.is_match("- [ ] ship it 🔽"));
        assert!(!any.is_match("- [ ] ship it"));
    }
}
