//! Contento - post composer with AI compliance feedback
//!
//! CLI entry point: run the feedback API, open the terminal composer, or
//! analyze a single post.

use std::fs;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use contento::cli::{Cli, Command, OutputFormat, get_log_path};
use contento::composer::{Backend, Composer, HttpBackend};
use contento::config::Config;
use contento::domain::{ExampleCategory, FeedbackLine, FeedbackResult, classify};
use contento::service::FeedbackService;
use contento::{server, tui};

fn setup_logging(to_file: bool, level: Option<&str>) -> Result<()> {
    let level: tracing::Level = level.and_then(|l| l.parse().ok()).unwrap_or(tracing::Level::INFO);
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    if to_file {
        // Write to a log file; stdout belongs to the TUI or the command output
        let log_path = get_log_path();
        if let Some(log_dir) = log_path.parent() {
            fs::create_dir_all(log_dir).context("Failed to create log directory")?;
        }
        let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_ansi(false)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Compose { direct: false });

    // Level priority: --log-level > config file > INFO
    let level = cli
        .log_level
        .clone()
        .or_else(|| Config::load_log_level(cli.config.as_ref()));
    setup_logging(command.logs_to_file(), level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "Contento loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match command {
        Command::Serve { bind } => cmd_serve(&config, bind).await,
        Command::Compose { direct } => cmd_compose(&config, direct).await,
        Command::Analyze { text, direct, format } => cmd_analyze(&config, &text, direct, format).await,
        Command::Examples { direct } => cmd_examples(&config, direct).await,
    }
}

/// Backend for client-side commands: the API server, or the LLM in-process
fn build_backend(config: &Config, direct: bool) -> Result<Arc<dyn Backend>> {
    if direct {
        info!("Using in-process feedback service");
        return Ok(Arc::new(FeedbackService::from_config(&config.llm)));
    }

    info!(url = %config.composer.backend_url, "Using feedback API");
    let backend = HttpBackend::new(&config.composer.backend_url, config.composer.request_timeout())
        .context("Failed to create HTTP client")?;
    Ok(Arc::new(backend))
}

/// Run the feedback API server
async fn cmd_serve(config: &Config, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let service = FeedbackService::from_config(&config.llm);
    server::serve(&bind, service).await
}

/// Open the terminal composer
async fn cmd_compose(config: &Config, direct: bool) -> Result<()> {
    let backend = build_backend(config, direct)?;
    let (composer, composer_rx) = Composer::new(backend, config.composer.debounce());
    tui::run(composer, composer_rx).await
}

/// Analyze one post and print the classified feedback
async fn cmd_analyze(config: &Config, text: &str, direct: bool, format: OutputFormat) -> Result<()> {
    let backend = build_backend(config, direct)?;
    let raw = backend.analyze(text).await.context("Failed to analyze post")?;
    let feedback = classify(&raw);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&feedback_json(&feedback))?),
        OutputFormat::Text => print_feedback(&feedback),
    }
    Ok(())
}

fn feedback_json(feedback: &FeedbackResult) -> serde_json::Value {
    if feedback.is_policy_alert() {
        serde_json::json!({
            "feedback": feedback.raw(),
            "policyAlert": true,
            "alert": feedback.alert_sentence(),
            "suggestion": feedback.alert_suggestion(),
        })
    } else {
        let suggestions: Vec<&str> = feedback.suggestion_lines().iter().map(FeedbackLine::text).collect();
        serde_json::json!({
            "feedback": feedback.raw(),
            "policyAlert": false,
            "suggestions": suggestions,
        })
    }
}

fn print_feedback(feedback: &FeedbackResult) {
    if feedback.is_policy_alert() {
        println!("{} {}", "⚠ Policy Alert:".red().bold(), feedback.alert_sentence());
        if !feedback.alert_suggestion().is_empty() {
            println!();
            println!("{} {}", "Suggestion:".yellow().bold(), feedback.alert_suggestion());
        }
        return;
    }

    for line in feedback.suggestion_lines() {
        match line {
            FeedbackLine::Bullet(text) => println!("{} {}", "•".cyan(), text),
            FeedbackLine::Paragraph(text) => println!("{}", text),
        }
    }
}

/// Generate examples and print one per category
async fn cmd_examples(config: &Config, direct: bool) -> Result<()> {
    let backend = build_backend(config, direct)?;
    let examples = backend.examples().await.context("Failed to generate examples")?;

    for category in ExampleCategory::ALL {
        println!("{}", category.label().bold());
        println!("  {}", examples.get(category));
        println!();
    }
    Ok(())
}
