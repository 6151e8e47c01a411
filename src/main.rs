//! `cellar` - interactive beverage inventory.
//!
//! Usage:
//!   cellar [--file beers.txt] [--log-level warn] [--no-expiry-warning]

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cellar::{
    core::store::CellarStore,
    persist::{Backend, flatfile::FlatFile},
    runtime::session::{Session, SessionConfig},
};

/// Track a beer cellar from the terminal.
#[derive(Parser, Debug)]
#[command(name = "cellar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Inventory file, read at startup and written on quit.
    #[arg(short, long, env = "CELLAR_FILE", default_value = "beers.txt")]
    file: PathBuf,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, env = "CELLAR_LOG", default_value = "warn")]
    log_level: String,

    /// Skip the list of beers expiring within a month.
    #[arg(long)]
    no_expiry_warning: bool,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stderr keeps the prompts on stdout readable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let file = FlatFile::new(cli.file.clone());
    let mut store = CellarStore::new();
    if let Err(err) = file.load_into(&mut store) {
        tracing::error!(path = %file.path().display(), error = %err, "could not read inventory, starting empty");
        store = CellarStore::new();
    }

    println!("Welcome to Beer Cellar!");
    let config = SessionConfig {
        expiry_warning: !cli.no_expiry_warning,
        ..SessionConfig::default()
    };
    let stdin = io::stdin();
    Session::new(store, file, stdin.lock(), io::stdout())
        .with_config(config)
        .run()?;
    Ok(())
}
