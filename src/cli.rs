//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Filter;

/// ZenPlan - task list with LLM-assisted task breakdown
#[derive(Parser)]
#[command(
    name = "zp",
    about = "Task list with LLM-assisted task breakdown",
    version,
    after_help = "Logs are written to: ~/.local/share/zenplan/logs/zenplan.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Add a task to the list
    Add {
        /// Task description
        text: String,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Due time (HH:MM)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// List tasks
    List {
        /// Which tasks to show
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },

    /// Toggle a task's completed state
    Toggle {
        /// Task id (a unique prefix is enough)
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task id (a unique prefix is enough)
        id: String,
    },

    /// Break a task into sub-tasks with the configured LLM
    Breakdown {
        /// Task id (a unique prefix is enough)
        id: String,
    },

    /// Show aggregate counts
    Stats {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for the stats command
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["zp"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_add() {
        let cli = Cli::parse_from(["zp", "add", "Buy milk"]);
        if let Some(Command::Add { text, date, time }) = cli.command {
            assert_eq!(text, "Buy milk");
            assert!(date.is_none());
            assert!(time.is_none());
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_parse_add_with_due() {
        let cli = Cli::parse_from(["zp", "add", "Dentist", "--date", "2026-04-02", "--time", "14:30"]);
        if let Some(Command::Add { text, date, time }) = cli.command {
            assert_eq!(text, "Dentist");
            assert_eq!(date.as_deref(), Some("2026-04-02"));
            assert_eq!(time.as_deref(), Some("14:30"));
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_parse_list_default_filter() {
        let cli = Cli::parse_from(["zp", "list"]);
        assert!(matches!(cli.command, Some(Command::List { filter: Filter::All })));
    }

    #[test]
    fn test_cli_parse_list_active() {
        let cli = Cli::parse_from(["zp", "list", "--filter", "active"]);
        assert!(matches!(cli.command, Some(Command::List { filter: Filter::Active })));
    }

    #[test]
    fn test_cli_parse_toggle_and_rm() {
        let cli = Cli::parse_from(["zp", "toggle", "abc123"]);
        assert!(matches!(cli.command, Some(Command::Toggle { ref id }) if id == "abc123"));

        let cli = Cli::parse_from(["zp", "rm", "abc123"]);
        assert!(matches!(cli.command, Some(Command::Rm { ref id }) if id == "abc123"));
    }

    #[test]
    fn test_cli_parse_breakdown() {
        let cli = Cli::parse_from(["zp", "breakdown", "abc123"]);
        assert!(matches!(cli.command, Some(Command::Breakdown { ref id }) if id == "abc123"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["zp", "-c", "/path/to/config.yml", "list"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
