/// External search engine runner
///
/// Runs ripgrep (or whatever `search.program` points at) once per call and
/// hands back its stdout lines. Every failure mode collapses to an empty
/// result: a missing binary, a non-zero exit and a timeout all look like
/// "nothing matched" to the caller.

use crate::config::SearchConfig;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Optional engine flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFlag {
    /// Print only the names of matching files
    FilesWithMatches,
    /// Case-insensitive matching
    IgnoreCase,
    /// Prefix each match with its line number
    LineNumber,
}

impl SearchFlag {
    pub fn as_arg(&self) -> &'static str {
        match self {
            SearchFlag::FilesWithMatches => "-l",
            SearchFlag::IgnoreCase => "-i",
            SearchFlag::LineNumber => "-n",
        }
    }
}

/// Runs pattern searches against a vault
#[derive(Debug, Clone)]
pub struct SearchExecutor {
    program: String,
    args: Vec<String>,
    extension: String,
    timeout: Duration,
}

impl SearchExecutor {
    /// Create a new executor
    ///
    /// # Arguments
    /// * `program` - Search binary, e.g. "rg"
    /// * `extension` - Note extension without the dot
    /// * `timeout` - Upper bound for a single search
    pub fn new(program: impl Into<String>, extension: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            extension: extension.into(),
            timeout,
        }
    }

    /// Build an executor from the `[search]` config section
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(&config.program, &config.extension, config.timeout()).with_args(config.args.clone())
    }

    /// Extra arguments passed before the pattern
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Run one search
    ///
    /// The engine runs with `root` as its working directory, so reported
    /// paths are relative to the vault.
    ///
    /// # Returns
    /// * Output lines on a zero exit status, otherwise an empty `Vec`
    pub async fn run(&self, pattern: &str, root: &Path, flags: &[SearchFlag]) -> Vec<String> {
        let glob = format!("*.{}", self.extension);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(pattern)
            .arg("--glob")
            .arg(&glob)
            .args(flags.iter().map(SearchFlag::as_arg))
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            // Dropping the child on timeout kills it
            .kill_on_drop(true);

        debug!(program = %self.program, pattern, root = %root.display(), ?flags, "running search");

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(program = %self.program, error = %e, "failed to start search engine");
                return Vec::new();
            }
        };

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
                debug!(pattern, hits = lines.len(), "search finished");
                lines
            }
            Ok(Ok(output)) => {
                // rg exits 1 on no match, 2 on error
                debug!(pattern, status = ?output.status.code(), "search returned no results");
                Vec::new()
            }
            Ok(Err(e)) => {
                warn!(pattern, error = %e, "search engine I/O failed");
                Vec::new()
            }
            Err(_) => {
                warn!(pattern, timeout_ms = self.timeout.as_millis() as u64, "search timed out");
                Vec::new()
            }
        }
    }
}
