mod tui;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use confessions::{AppConfig, ConfessionsService};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "confessions")]
#[command(about = "Anonymous confession board with an admin-only panel")]
struct Cli {
    /// Directory for the confession slot and log file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the Terminal User Interface (default)
    Tui,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    let data_dir = config.data_dir();

    // The terminal belongs to the UI, so logs go to a file next to the slot
    init_logging(&data_dir);
    info!("Starting Campus Confessions v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", data_dir.display());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let service = ConfessionsService::from_config(&config);
            if !service.is_persistent() {
                warn!("Running without a writable data directory");
            }
            // Fire and forget; sign-in hashes inline until this lands.
            let _digest_task = service.authenticator().spawn_precompute();
            tui::run_tui(service).await
        }
    }
}

/// File-backed logging. An unusable data directory disables the file layer
/// rather than stopping the board.
fn init_logging(data_dir: &Path) {
    let log_file = fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("confessions.log"))
    });

    let (file_layer, open_error) = match log_file {
        Ok(file) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confessions=info,confessions_tui=info".into()),
        )
        .with(file_layer)
        .init();

    if let Some(e) = open_error {
        // Stderr is still ours until the alternate screen is entered.
        eprintln!(
            "warning: logging disabled, cannot open {}: {}",
            data_dir.join("confessions.log").display(),
            e
        );
    }
}
