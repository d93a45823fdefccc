use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mailview::core::config::{load_config, resolve};
use mailview::core::snapshot::{Snapshot, load_snapshot};
use mailview::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "mailview", about = "Text-mode mail folder and message viewer")]
struct Args {
    /// TOML snapshot of folders and messages to browse
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Folder limit: "all", "new", or part of a folder path
    #[arg(short, long)]
    limit: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("mailview.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("mailview starting up");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mailview: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = resolve(&config, args.limit.as_deref());

    let snapshot = match &args.snapshot {
        Some(path) => match load_snapshot(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("mailview: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Snapshot::default(),
    };

    match tui::run(resolved, snapshot) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {}", e);
            eprintln!("mailview: {e}");
            ExitCode::FAILURE
        }
    }
}
