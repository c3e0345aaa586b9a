//! ZenPlan - task list with LLM-assisted task breakdown
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use zenplan::cli::{Cli, Command, OutputFormat};
use zenplan::config::Config;
use zenplan::domain::{Filter, Task};
use zenplan::llm::create_client;
use zenplan::planning::SubtaskGenerator;
use zenplan::session::Session;
use zenplan::state::StateManager;
use zenplan::store::FileStore;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zenplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, not stdout/stderr - stdout is the UI
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("zenplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "ZenPlan loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Add { text, date, time }) => cmd_add(&config, &text, date, time).await,
        Some(Command::List { filter }) => cmd_list(&config, filter).await,
        Some(Command::Toggle { id }) => cmd_toggle(&config, &id).await,
        Some(Command::Rm { id }) => cmd_rm(&config, &id).await,
        Some(Command::Breakdown { id }) => cmd_breakdown(&config, &id).await,
        Some(Command::Stats { format }) => cmd_stats(&config, format).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Open the task store and spawn the state actor
fn open_state(config: &Config) -> Result<StateManager> {
    let store = FileStore::open(&config.storage.data_dir).context("Failed to open task store")?;
    StateManager::spawn(Box::new(store))
}

/// Resolve a user-supplied id prefix to a full task id.
///
/// Exact-id semantics stay in the store; accepting a unique prefix here is
/// purely CLI convenience.
async fn resolve_id(state: &StateManager, prefix: &str) -> Result<Option<String>> {
    let tasks = state.list_tasks(Filter::All).await?;
    let matches: Vec<&Task> = tasks.iter().filter(|t| t.id.starts_with(prefix)).collect();

    match matches.len() {
        0 => {
            println!("No task matches '{}'", prefix);
            Ok(None)
        }
        1 => Ok(Some(matches[0].id.clone())),
        n => {
            println!("'{}' is ambiguous ({} tasks match); use more of the id", prefix, n);
            Ok(None)
        }
    }
}

/// Add a task. Empty or whitespace-only text is rejected silently.
async fn cmd_add(config: &Config, text: &str, date: Option<String>, time: Option<String>) -> Result<()> {
    let state = open_state(config)?;

    if let Some(task) = state.add_task(text, date, time).await? {
        println!("Added {} {}", short_id(&task.id).dimmed(), task.text);
    }

    state.shutdown().await?;
    Ok(())
}

/// List tasks through a filter
async fn cmd_list(config: &Config, filter: Filter) -> Result<()> {
    let state = open_state(config)?;

    let tasks = state.list_tasks(filter).await?;
    if tasks.is_empty() {
        println!("All clear! Enjoy your productive day.");
        state.shutdown().await?;
        return Ok(());
    }

    let now = chrono::Local::now().naive_local();
    for task in &tasks {
        print_task(task, now);
    }

    let stats = state.stats().await?;
    println!();
    println!("{} items left", stats.active);

    state.shutdown().await?;
    Ok(())
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn print_task(task: &Task, now: chrono::NaiveDateTime) {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };

    let text = if task.completed {
        task.text.strikethrough().dimmed().to_string()
    } else {
        task.text.normal().to_string()
    };

    let mut line = format!("{} {} {}", checkbox, short_id(&task.id).dimmed(), text);

    if let Some(date) = &task.date {
        let due = match &task.time {
            Some(time) => format!("{} {}", date, time),
            None => date.clone(),
        };
        if task.is_past_due(now) {
            line.push_str(&format!("  {}", due.red().bold()));
        } else {
            line.push_str(&format!("  {}", due.cyan()));
        }
    }

    println!("{}", line);

    if let Some(subtasks) = &task.subtasks {
        for sub in subtasks {
            println!("      {} {}", "·".magenta(), sub);
        }
    }
}

/// Toggle a task's completed state
async fn cmd_toggle(config: &Config, id: &str) -> Result<()> {
    let state = open_state(config)?;

    if let Some(id) = resolve_id(&state, id).await? {
        state.toggle_task(&id).await?;
        if let Some(task) = state.get_task(&id).await? {
            let mark = if task.completed { "done" } else { "open" };
            println!("{} {} {}", mark, short_id(&id).dimmed(), task.text);
        }
    }

    state.shutdown().await?;
    Ok(())
}

/// Delete a task
async fn cmd_rm(config: &Config, id: &str) -> Result<()> {
    let state = open_state(config)?;

    if let Some(id) = resolve_id(&state, id).await? {
        state.delete_task(&id).await?;
        println!("Removed {}", short_id(&id).dimmed());
    }

    state.shutdown().await?;
    Ok(())
}

/// Break a task into sub-tasks with the configured LLM
async fn cmd_breakdown(config: &Config, id: &str) -> Result<()> {
    // Validate API key early - a clear message beats a silent empty result
    config.validate()?;

    let state = open_state(config)?;
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let session = Session::new(state, Arc::new(SubtaskGenerator::new(llm)));

    let Some(id) = resolve_id(session.state(), id).await? else {
        session.state().shutdown().await?;
        return Ok(());
    };

    match session.request_breakdown(&id).await {
        Some(handle) => {
            println!("Generating sub-tasks...");
            handle.await.context("Breakdown task panicked")?;

            let task = session.state().get_task(&id).await?;
            match task.and_then(|t| t.subtasks) {
                Some(subtasks) if !subtasks.is_empty() => {
                    for sub in &subtasks {
                        println!("  {} {}", "·".magenta(), sub);
                    }
                }
                _ => println!("No sub-tasks returned."),
            }
        }
        None => {
            println!("Nothing to do - task already has sub-tasks or a request is in flight.");
        }
    }

    session.state().shutdown().await?;
    Ok(())
}

/// Show aggregate counts
async fn cmd_stats(config: &Config, format: OutputFormat) -> Result<()> {
    let state = open_state(config)?;
    let stats = state.stats().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Text => {
            println!("ZenPlan");
            println!("-------");
            println!("Total:     {}", stats.total);
            println!("Done:      {}", stats.completed);
            println!("Active:    {}", stats.active);
            println!("AI boosts: {}", stats.boosted);
        }
    }

    state.shutdown().await?;
    Ok(())
}
