// Task search over checklist lines
//
// Classifies the query (due today, overdue, priority, everything), greps for
// open `- [ ]` items and, for overdue queries, filters on the date marker
// since ripgrep can't compare dates.

use crate::core::executor::{SearchExecutor, SearchFlag};
use crate::error::{Result, VaultSearchError};
use crate::query::intent::DUE_MARKER;
use crate::query::TaskIntent;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// One open task, parsed from a `file:line:text` match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub file: String,
    pub line: String,
    pub text: String,
    /// The `📅 YYYY-MM-DD` marker, if the task has one
    pub due: Option<String>,
}

impl TaskRecord {
    /// Overdue means due strictly before today
    ///
    /// Plain string comparison: YYYY-MM-DD sorts chronologically.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        let today = today.format("%Y-%m-%d").to_string();
        self.due.as_deref().is_some_and(|due| due < today.as_str())
    }
}

pub struct TaskSearch {
    executor: Arc<SearchExecutor>,
    due_date: Regex,
}

impl TaskSearch {
    pub fn new(executor: Arc<SearchExecutor>) -> Result<Self> {
        let due_date = Regex::new(&format!(r"{DUE_MARKER} (\d{{4}}-\d{{2}}-\d{{2}})"))?;
        Ok(Self { executor, due_date })
    }

    /// Find open tasks matching the query's intent
    ///
    /// Malformed engine lines are skipped. For overdue queries, tasks
    /// without a date marker are skipped too.
    pub async fn search(&self, query: &str, root: &Path, today: NaiveDate) -> Result<Vec<TaskRecord>> {
        if query.trim().is_empty() {
            return Err(VaultSearchError::EmptyQuery);
        }

        let intent = TaskIntent::classify(query);
        let pattern = intent.pattern(today);
        debug!(?intent, %pattern, "task query interpreted");

        let lines = self
            .executor
            .run(&pattern, root, &[SearchFlag::LineNumber])
            .await;

        let tasks = lines
            .iter()
            .filter_map(|line| self.parse_line(line))
            .filter(|task| intent != TaskIntent::Overdue || task.is_overdue(today))
            .collect();

        Ok(tasks)
    }

    // Split "file:line:text" on the first two colons. The text keeps any
    // colons of its own.
    fn parse_line(&self, line: &str) -> Option<TaskRecord> {
        if line.trim().is_empty() {
            return None;
        }

        let mut parts = line.splitn(3, ':');
        let file = parts.next()?;
        let line_no = parts.next()?;
        let text = parts.next()?;

        let due = self
            .due_date
            .captures(text)
            .map(|caps| caps[1].to_string());

        Some(TaskRecord {
            file: file.to_string(),
            line: line_no.to_string(),
            text: text.to_string(),
            due,
        })
    }
}
