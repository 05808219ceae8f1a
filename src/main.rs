// vault-search - the parts of note search that ripgrep can't do on its own
//
// Parses CLI args, picks the note or task pipeline and prints the results.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use vault_search_lib::{
    core::{NoteSearch, SearchExecutor, TaskRecord, TaskSearch},
    query::{LanguageDetector, LanguageTag, SearchMode},
    Config,
};

#[derive(Parser)]
#[command(name = "vault-search")]
#[command(about = "Vault search with natural language support")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    vault-search 'recent week psychology'
    vault-search 'tasks due today'
    vault-search '找3-2-1技巧'")]
struct Cli {
    /// Search query
    query: String,

    /// Vault path
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    /// Max results (default: 10, or output.limit from the config file)
    #[arg(long)]
    limit: Option<usize>,

    /// Raw output for piping
    #[arg(long, conflicts_with = "json")]
    raw: bool,

    /// JSON output
    #[arg(long)]
    json: bool,

    /// Force note or task search instead of guessing from the query
    #[arg(long, value_enum, default_value = "auto")]
    mode: ModeArg,

    /// Path to config file (default: <config dir>/vault-search/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Auto,
    Notes,
    Tasks,
}

#[derive(Serialize)]
struct JsonOutput<'a, T: Serialize> {
    query: &'a str,
    mode: SearchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<LanguageTag>,
    total: usize,
    results: &'a [T],
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Failed to load configuration")?;
    let limit = cli.limit.unwrap_or(config.output.limit);

    // Computed once; every date comparison in this run uses it
    let today = chrono::Local::now().date_naive();

    let executor = Arc::new(SearchExecutor::from_config(&config.search));

    let mode = match cli.mode {
        ModeArg::Auto => SearchMode::classify(&cli.query),
        ModeArg::Notes => SearchMode::Notes,
        ModeArg::Tasks => SearchMode::Tasks,
    };

    match mode {
        SearchMode::Tasks => {
            let tasks = TaskSearch::new(executor)?
                .search(&cli.query, &cli.vault, today)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            handle_tasks(&cli, &tasks, limit, today)
        }
        SearchMode::Notes => {
            let notes = NoteSearch::new(executor)?
                .search(&cli.query, &cli.vault, today)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            handle_notes(&cli, &notes, limit)
        }
    }
}

fn handle_tasks(cli: &Cli, tasks: &[TaskRecord], limit: usize, today: chrono::NaiveDate) -> Result<()> {
    let shown = &tasks[..tasks.len().min(limit)];

    if cli.json {
        return print_json(&cli.query, SearchMode::Tasks, None, tasks.len(), shown);
    }

    if cli.raw {
        for task in shown {
            println!("{}:{}:{}", task.file, task.line, task.text);
        }
        return Ok(());
    }

    println!("🔍 Tasks: '{}'", cli.query);
    println!("{}", "=".repeat(60));
    if tasks.is_empty() {
        println!("❌ No tasks found");
        return Ok(());
    }

    for (i, task) in shown.iter().enumerate() {
        let marker = if task.is_overdue(today) { " ⚠️ overdue" } else { "" };
        println!("\n{}. {}:{}{}", i + 1, task.file, task.line, marker);
        println!("   {}", task.text.trim());
    }
    if tasks.len() > limit {
        println!("\n💡 Showing {} of {} tasks", limit, tasks.len());
    }

    Ok(())
}

fn handle_notes(cli: &Cli, notes: &[String], limit: usize) -> Result<()> {
    let shown = &notes[..notes.len().min(limit)];

    let language = LanguageDetector::detect(&cli.query);

    if cli.json {
        return print_json(&cli.query, SearchMode::Notes, Some(language), notes.len(), shown);
    }

    if cli.raw {
        for note in shown {
            println!("{}", note);
        }
        return Ok(());
    }

    println!("🔍 Notes: '{}' [{}]", cli.query, language);
    println!("{}", "=".repeat(60));
    if notes.is_empty() {
        println!("❌ No notes found");
        return Ok(());
    }

    for (i, note) in shown.iter().enumerate() {
        println!("{}. {}", i + 1, note);
    }
    if notes.len() > limit {
        println!("\n💡 Showing {} of {} notes", limit, notes.len());
    }

    Ok(())
}

fn print_json<T: Serialize>(
    query: &str,
    mode: SearchMode,
    language: Option<LanguageTag>,
    total: usize,
    results: &[T],
) -> Result<()> {
    let output = JsonOutput {
        query,
        mode,
        language,
        total,
        results,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize results")?
    );
    Ok(())
}
