//! Rakshak CLI - Main Entry Point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rakshak_core::api::commands::{self, Report};
use rakshak_core::api::shell::Shell;
use rakshak_core::constants::{self, DEFAULT_EXPORT_COUNT};
use rakshak_core::logic::classify::{ApiClient, CheckKind};
use rakshak_core::logic::controller::CheckController;
use rakshak_core::logic::history::{FileStore, HistoryStore};
use rakshak_core::Config;

#[derive(Parser)]
#[command(name = "rakshak", version, about = "Rakshak - XSS and phishing checker")]
struct Args {
    /// Classification API base URL (overrides RAKSHAK_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Directory for persisted history (overrides RAKSHAK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Check a payload for XSS
    Xss {
        payload: String,
    },
    /// Check a URL for phishing
    Url {
        url: String,
    },
    /// Show check history, newest first
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Export the most recent records as JSON
    Export {
        #[arg(long, default_value_t = DEFAULT_EXPORT_COUNT)]
        count: usize,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete all stored history
    ClearHistory,
    /// Ping the classification API
    Health,
    /// Interactive shell (default)
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // stderr keeps stdout clean for rendered output and exports
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "rakshak_core=info,rakshak=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(api_base) = args.api_base {
        config = config.with_api_base(api_base);
    }
    if let Some(data_dir) = args.data_dir {
        config = config.with_data_dir(data_dir);
    }
    config.validate()?;

    tracing::debug!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);
    tracing::debug!("API: {}, data: {}", config.api_base, config.data_dir.display());

    let client = ApiClient::new(&config).context("failed to build HTTP client")?;
    let history = HistoryStore::open(Box::new(FileStore::new(&config.data_dir)));
    let mut controller = CheckController::new(Box::new(client.clone()), history);

    let report = match args.command.unwrap_or(Command::Shell) {
        Command::Xss { payload } => commands::check(&mut controller, CheckKind::Xss, &payload).await,
        Command::Url { url } => commands::check(&mut controller, CheckKind::Url, &url).await,
        Command::History { limit } => commands::history(&controller, limit),
        Command::Export { count, output } => commands::export(&controller, count, output.as_deref())?,
        Command::ClearHistory => commands::clear_history(&mut controller),
        Command::Health => commands::health(&client).await,
        Command::Shell => {
            Shell::new(controller, client).run().await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(finish(report))
}

fn finish(report: Report) -> ExitCode {
    println!("{}", report.text);
    if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
