//! Batch entry point: load a catalog and patrons, run commands, print output.
//!
//! # Responsibility
//! - Parse command-line options and map them onto `LibraryService` calls.
//! - Surface file and configuration failures as process errors.

use anyhow::{Context, Result};
use clap::Parser;
use libris_core::{default_log_level, init_logging, LibraryService, StoreConfig};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "libris")]
#[command(about = "Run a library circulation batch against a catalog and patron list")]
#[command(version)]
struct Cli {
    /// Catalog file, one record per line
    #[arg(short, long)]
    books: PathBuf,

    /// Patron file, `key first last` per line
    #[arg(short, long)]
    patrons: PathBuf,

    /// Command file, one command per line
    #[arg(short, long)]
    commands: PathBuf,

    /// JSON store configuration (built-in tables when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long, env = "LIBRIS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Print the whole library once the commands have run
    #[arg(long)]
    display: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = absolute(log_dir)?;
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir)
            .with_context(|| format!("initializing logs in `{}`", log_dir.display()))?;
    }

    let config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading config `{}`", path.display()))?,
        None => StoreConfig::default(),
    };

    let mut service = LibraryService::new(&config)?;
    let records = service.load_records_from_file(&cli.books)?;
    let patrons = service.load_patrons_from_file(&cli.patrons)?;
    let commands = service.accept_commands_from_file(&cli.commands)?;
    if cli.display {
        service.render_library();
    }

    info!(
        "event=batch_done module=cli status=ok records={} patrons={} kept={} discarded={}",
        records.accepted, patrons.accepted, commands.kept, commands.discarded
    );
    print!("{}", service.take_output());
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("resolving current directory")?;
    Ok(cwd.join(path))
}
