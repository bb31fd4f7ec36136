//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Contento - post composer with AI compliance feedback
#[derive(Parser)]
#[command(
    name = "ct",
    about = "Compose posts with real-time AI compliance feedback",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/contento/logs/contento.log (serve logs to stdout)"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `compose`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the feedback API server
    Serve {
        /// Address to bind (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Open the terminal composer
    Compose {
        /// Call the LLM in-process instead of the API server
        #[arg(long)]
        direct: bool,
    },

    /// Analyze a single post and print the feedback
    Analyze {
        /// Post text
        text: String,

        /// Call the LLM in-process instead of the API server
        #[arg(long)]
        direct: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate and print a set of example posts
    Examples {
        /// Call the LLM in-process instead of the API server
        #[arg(long)]
        direct: bool,
    },
}

impl Command {
    /// True for commands that own the terminal or print results to stdout
    pub fn logs_to_file(&self) -> bool {
        !matches!(self, Command::Serve { .. })
    }
}

/// Output format for the analyze command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
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

/// Path of the log file written by interactive commands
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contento")
        .join("logs")
        .join("contento.log")
}
