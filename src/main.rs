//! Festlang - Festival Metadata Translation
//!
//! Entry point for the festlang command line tool, which translates a
//! festival CSV export into a multilingual CSV keyed by festival id and
//! language code.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use festlang::batch::BatchJob;
use festlang::cli::{Args, Commands};
use festlang::config::{Config, TranslationBackend};
use festlang::error::FestlangError;
use festlang::language::Language;
use festlang::translate::{self, TranslatorFactory};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;

    match args.command {
        Commands::Run { input, output, delay_ms, backend, no_progress } => {
            if let Some(input) = input {
                config.batch.input = input;
            }
            if let Some(output) = output {
                config.batch.output = output;
            }
            if let Some(delay_ms) = delay_ms {
                config.batch.row_delay_ms = delay_ms;
            }
            if let Some(backend) = backend {
                apply_backend(&mut config, &backend)?;
            }

            info!(
                "Translating {} -> {} ({:?} backend, {} ms between rows)",
                config.batch.input.display(),
                config.batch.output.display(),
                config.translate.backend,
                config.batch.row_delay_ms
            );

            let translator = TranslatorFactory::create(&config.translate)?;
            let job = BatchJob::new(translator, config.batch.row_delay())
                .with_progress(!no_progress);
            let report = job.run_file(&config.batch.input, &config.batch.output).await?;

            println!(
                "Translation complete: {} festivals, {} rows written to {} ({} skipped, {} fallbacks)",
                report.rows_translated,
                report.rows.len(),
                config.batch.output.display(),
                report.rows_skipped,
                report.fallbacks
            );
        }
        Commands::Check { backend } => {
            if let Some(backend) = backend {
                apply_backend(&mut config, &backend)?;
            }
            info!("Checking {:?} backend at {}", config.translate.backend, config.translate.endpoint);
            translate::check_availability(&config.translate).await?;
            println!("{:?} backend is available", config.translate.backend);
        }
        Commands::Languages => {
            println!("{:<6} {:<6} {:<10}", "Code", "Lang", "Name");
            println!("{}", "-".repeat(24));
            for language in Language::ALL {
                println!("{:<6} {:<6} {:<10}", language.code(), language.id(), language.name());
            }
        }
        Commands::InitConfig { output, force } => {
            if output.exists() && !force {
                return Err(FestlangError::Config(format!(
                    "{} already exists, use --force to overwrite",
                    output.display()
                )).into());
            }
            Config::default().save_to_file(&output)?;
            info!("Wrote default configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Switch backend, resetting the endpoint when it still points at another backend's default
fn apply_backend(config: &mut Config, backend: &str) -> Result<()> {
    let backend = parse_backend(backend)?;
    let previous = config.translate.backend;
    if backend != previous && config.translate.endpoint == previous.default_endpoint() {
        config.translate.endpoint = backend.default_endpoint().to_string();
    }
    config.translate.backend = backend;
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".festlang").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "festlang.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber.try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("festlang.log").display());

    Ok(())
}

/// Parse translation backend from string
fn parse_backend(backend: &str) -> Result<TranslationBackend> {
    match backend.to_lowercase().as_str() {
        "google" => Ok(TranslationBackend::Google),
        "ollama" => Ok(TranslationBackend::Ollama),
        "passthrough" | "none" => Ok(TranslationBackend::Passthrough),
        _ => Err(FestlangError::Config(format!(
            "Invalid translation backend '{}'. Valid backends: google, ollama, passthrough",
            backend
        )).into()),
    }
}

