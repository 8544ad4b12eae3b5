//! CLI entrypoint for docquiz
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use docquiz_application::{CreateQuizUseCase, GenerationProgressNotifier, ImportQuizUseCase, NoProgress};
use docquiz_domain::OutputFormat;
use docquiz_infrastructure::{
    ConfigLoader, FileConfig, GeminiClient, JsonlQuestionStore, LocalDocumentExtractor,
};
use docquiz_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting docquiz");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_config_issues(&issues));
    }
    if !config.output.color || !std::io::stdout().is_terminal() {
        ConsoleFormatter::disable_color();
    }

    // === Request ===
    let (default_questions, _) = config.generation.question_count();
    let plan = cli.to_request(default_questions)?;
    for warning in &plan.warnings {
        warn!("{}", warning);
        eprintln!("warning: {}", warning);
    }

    // === Dependency Injection ===
    let (extraction_settings, _) = config.extraction.to_settings();
    let extractor = Arc::new(
        LocalDocumentExtractor::new(&extraction_settings)
            .context("Failed to set up the web client")?,
    );
    if !extractor.pdf_capability().is_available() {
        info!("PDF sources will be parsed in-process; page ranges are approximate");
    }
    let client = Arc::new(gemini_client(&config)?);
    let (params, _) = config.generation.to_params();

    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            ctrl_c_token.cancel();
        }
    });

    let use_case = CreateQuizUseCase::new(extractor, client)
        .with_params(params)
        .with_cancellation(cancellation);

    let progress: Box<dyn GenerationProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let output = use_case
        .execute_with_progress(plan.input, progress.as_ref())
        .await?;
    drop(progress);

    // === Output ===
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    match format {
        OutputFormat::Summary => print!("{}", ConsoleFormatter::format(&output)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&output)),
    }

    // === Import ===
    if let Some(category) = &cli.save {
        let dir = cli.store_dir.clone().unwrap_or_else(default_store_dir);
        info!("Saving questions under {}", dir.display());
        let store = Arc::new(JsonlQuestionStore::new(dir));
        let selection = cli.selection();
        let summary = ImportQuizUseCase::new(store)
            .execute(output.quiz, category, selection.as_deref())
            .await?;
        eprint!("{}", ConsoleFormatter::format_import(&summary, category));
    }

    Ok(())
}

/// Stderr logging filtered by `-v` (or `RUST_LOG`), plus an optional log file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Some(file_name) = path.file_name() else {
        bail!("Invalid log file path: {}", path.display());
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

fn gemini_client(config: &FileConfig) -> Result<GeminiClient> {
    let Some(api_key) = config
        .gemini
        .resolve_api_key(|name| std::env::var(name).ok())
    else {
        bail!(
            "No API key found. Set the {} environment variable or [gemini] api_key in the config file.",
            config.gemini.api_key_env
        );
    };
    let (settings, _) = config.gemini.to_settings(api_key);
    info!("Using model {}", settings.model);
    Ok(GeminiClient::new(settings)?)
}

fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("docquiz").join("questions"))
        .unwrap_or_else(|| PathBuf::from("docquiz-questions"))
}

fn print_config_sources(explicit: Option<&Path>) {
    println!("Configuration sources (in priority order):");
    for source in ConfigLoader::sources(explicit) {
        let mark = if source.found { "FOUND" } else { "     " };
        println!("  [{}] {:<8} {}", mark, format!("{}:", source.label), source.path.display());
    }
    println!("  [     ] Default: built-in defaults");
}
