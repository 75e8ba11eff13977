// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use phone_display::config::Config;
use phone_display::constants::{storage, terminal};
use std::path::PathBuf;
use std::sync::Mutex;

mod cli;

#[derive(Parser)]
#[command(name = "phone-display")]
#[command(about = "Simulated phone with lock screen, browser search, camera and photo gallery")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (default: <config dir>/phone-display/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the phone in the terminal (default)
    Terminal,

    /// List stored photos, most recent first
    Photos,

    /// Capture one photo from the virtual front camera into the store
    Capture {
        /// Image file to use as the camera feed instead of the test pattern
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Store the frame as the sensor sees it instead of mirrored
        #[arg(long)]
        no_mirror: bool,
    },

    /// Write a stored photo to disk as photo-<id>.jpg
    Export {
        /// Photo id (from 'phone-display photos')
        id: String,

        /// Output directory (default: ~/Pictures/phone-display)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a stored photo
    Delete {
        /// Photo id (from 'phone-display photos')
        id: String,
    },

    /// Print the address a search would open
    Search {
        /// Search text
        #[arg(required = true)]
        text: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Terminal));

    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=phone_display=debug, RUST_LOG=info
    init_logging(interactive);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match cli.command {
        None | Some(Commands::Terminal) => phone_display::terminal::run(config),
        Some(Commands::Photos) => cli::list_photos(),
        Some(Commands::Capture { source, no_mirror }) => {
            cli::capture_photo(config, source, no_mirror)
        }
        Some(Commands::Export { id, output }) => cli::export_photo(&id, output),
        Some(Commands::Delete { id }) => cli::delete_photo(&id),
        Some(Commands::Search { text }) => cli::search(&config, &text.join(" ")),
    }
}

/// The terminal UI owns the screen, so its logs go to a file
fn init_logging(to_file: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    let log_file = to_file
        .then(|| dirs::data_dir().map(|dir| dir.join(storage::APP_DIR)))
        .flatten()
        .and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(terminal::LOG_FILE))
                .ok()
        });

    match log_file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None if to_file => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}
