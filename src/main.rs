//! Soil Health - soil fertility classification service
//!
//! Serves the measurement form and the JSON prediction API, or runs a single
//! prediction from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Start the server (default subcommand)
//! ./soil-health --model model/random_forest_model.json
//!
//! # Classify one sample
//! echo '{"N": 50, "P": 20, ...}' | ./soil-health predict --input -
//!
//! # Inspect an exported artifact
//! ./soil-health check-model --model model/random_forest_model.json
//! ```
//!
//! # Environment Variables
//!
//! - `SOIL_CONFIG`: Path to a TOML config file (default: ./soil_config.toml)
//! - `SOIL_SERVER_ADDR`: Bind address override
//! - `SOIL_MODEL_PATH`: Classifier artifact path override
//! - `SOIL_LOG_FORMAT`: `pretty` or `json`
//! - `RUST_LOG`: Logging level (default: info)
//!
//! Logs go to stderr and, unless `[logging] enabled = false`, to daily-rotated
//! files under `logs/` (`soil_health_app.<date>.log`).

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use soil_health::api::handlers::predict_json;
use soil_health::api::{create_app, AppState};
use soil_health::config::{AppConfig, LoggingConfig};
use soil_health::engine::PredictionService;
use soil_health::model::{load_from_disk, load_optional};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "soil-health")]
#[command(about = "Soil fertility classification and remediation planning")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:5000")
    #[arg(short, long, global = true)]
    addr: Option<String>,

    /// Override the classifier artifact path
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Log output format
    #[arg(long, value_enum, env = "SOIL_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Run the HTTP server (default)
    Serve,

    /// Classify one JSON document and print the API response
    Predict {
        /// JSON file with the twelve measurements, or `-` for stdin
        #[arg(long)]
        input: PathBuf,
    },

    /// Load and validate the classifier artifact, then print a summary
    CheckModel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Console logging used while the config file is being read.
fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
}

/// Daily-rotated log file writer under `logging.dir`.
fn file_writer(logging: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(logging.file_prefix.as_str())
        .filename_suffix("log")
        .max_log_files(logging.max_files)
        .build(&logging.dir)
        .with_context(|| format!("Failed to open log directory {}", logging.dir.display()))?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber: stderr in the chosen format, plus the
/// rolling file sink when enabled. The returned guard flushes the file
/// writer on drop and must live until exit.
fn init_logging(format: LogFormat, logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console = match format {
        LogFormat::Pretty => fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    let (file, guard) = if logging.enabled {
        let (writer, guard) = file_writer(logging)?;
        let layer = fmt::layer()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(env_filter())
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(guard)
}

// ============================================================================
// Configuration
// ============================================================================

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = AppConfig::load();
    config.apply_overrides(args.addr.clone(), args.model.clone());
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_service(config: &AppConfig) -> Result<PredictionService> {
    let forest = load_optional(&config.model.path, config.model.required)
        .with_context(|| format!("Failed to load classifier artifact {}", config.model.path.display()))?;
    let service = PredictionService::from_forest(forest);

    match service.classifier().describe() {
        Some(summary) => info!("Classifier: {}", summary),
        None => info!("Classifier: fallback mode (every sample classified as Fertile)"),
    }
    Ok(service)
}

// ============================================================================
// Subcommands
// ============================================================================

async fn run_server(config: AppConfig) -> Result<()> {
    let service = build_service(&config)?;
    let app = create_app(AppState::new(service), &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.addr))?;
    info!("Listening on http://{}", config.server.addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("[HttpServer] Graceful shutdown complete");
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn run_predict(config: &AppConfig, input: &Path) -> Result<ExitCode> {
    let service = build_service(config)?;
    let body = read_input(input)?;

    let envelope = predict_json(&service, &body).context("Failed to render prediction")?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if envelope["success"] == true {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn run_check_model(config: &AppConfig) -> Result<()> {
    let path = &config.model.path;
    let (forest, metadata) = load_from_disk(path)
        .with_context(|| format!("Classifier artifact {} is not usable", path.display()))?;

    println!("artifact:   {}", path.display());
    println!("model:      {}", soil_health::FertilityModel::describe(&forest));
    println!("source:     {}", metadata.source.as_deref().unwrap_or("unknown"));
    println!("trained at: {}", metadata.trained_at.as_deref().unwrap_or("unknown"));
    println!("transform:  {}", metadata.transform.as_deref().unwrap_or("unspecified"));
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();

    let config = tracing::subscriber::with_default(bootstrap_subscriber(), || load_config(&args))?;
    let _log_guard = init_logging(args.log_format, &config.logging)?;
    info!("Soil Health Optimizer startup");
    if config.logging.enabled {
        info!(dir = %config.logging.dir.display(), prefix = %config.logging.file_prefix, "File logging enabled");
    }

    match &args.command {
        None | Some(SubCommand::Serve) => {
            if let Err(e) = run_server(config).await {
                error!("Server stopped: {:#}", e);
                return Err(e);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(SubCommand::Predict { input }) => run_predict(&config, input),
        Some(SubCommand::CheckModel) => {
            run_check_model(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_writer_creates_prefixed_log() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let logging = LoggingConfig {
            dir: dir.path().join("logs"),
            ..LoggingConfig::default()
        };

        let (writer, guard) = file_writer(&logging).expect("file writer");
        let subscriber = fmt().with_ansi(false).with_writer(writer).finish();
        tracing::subscriber::with_default(subscriber, || info!("Soil Health Optimizer startup"));
        drop(guard);

        let files: Vec<_> = std::fs::read_dir(&logging.dir)
            .expect("log dir created")
            .map(|e| e.expect("entry").path())
            .collect();
        assert_eq!(files.len(), 1, "{files:?}");

        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("soil_health_app."), "{name}");
        assert!(name.ends_with(".log"), "{name}");
        let contents = std::fs::read_to_string(&files[0]).expect("read log");
        assert!(contents.contains("Soil Health Optimizer startup"), "{contents}");
    }
}
