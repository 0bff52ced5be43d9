mod core;
mod dispatch;
#[cfg(test)]
mod test_support;
mod tui;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::core::config;
use crate::core::directory::ContactDirectory;

#[derive(Parser)]
#[command(name = "tpir", about = "Incident notification dispatch console")]
struct Args {
    /// Contact directory TOML file (default: embedded directory)
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tpir.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("tpir.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("TPIR starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.directory.as_deref().and_then(|p| p.to_str()),
    );

    let directory = match &resolved.directory_file {
        Some(path) => match ContactDirectory::load(path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Failed to load contact directory: {e}");
                std::process::exit(1);
            }
        },
        None => ContactDirectory::embedded(),
    };

    tui::run(resolved, Arc::new(directory))
}
