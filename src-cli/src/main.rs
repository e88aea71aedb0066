//! taab - address-bar shortcuts on the command line
//!
//! Reads `command[;arg...][;n]` lines and opens what they resolve to.

mod host;
mod opener;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use taab_core::{
    Config, Database, GistClient, MemoryStore, RemoteConfigLoader, SettingsStore, Taab,
};

use host::Host;
use opener::Opener;

#[derive(Parser, Debug)]
#[command(name = "taab", author, version, about, long_about = None)]
struct Args {
    /// Run a single line and exit instead of starting the prompt
    #[arg(value_name = "LINE")]
    line: Option<String>,

    /// Settings database path
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Keep settings in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "db")]
    memory: bool,

    /// Base URL of the gist API
    #[arg(long, value_name = "URL")]
    gist_api: Option<String>,

    /// Print navigation targets instead of opening them
    #[arg(long)]
    print_only: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(db) = &self.db {
            config.database_path = db.clone();
        }
        if let Some(api) = &self.gist_api {
            config.gist_api_base = api.clone();
        }
        config.print_only = self.print_only;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    taab_core::init_logging();

    let args = Args::parse();
    let config = args.config();

    if args.memory {
        tracing::info!("Using in-memory settings");
        run(MemoryStore::new(), &config, args.line).await
    } else {
        let db = Database::open(&config.database_path).with_context(|| {
            format!("failed to open settings at {}", config.database_path.display())
        })?;
        run(db, &config, args.line).await
    }
}

async fn run<S>(store: S, config: &Config, line: Option<String>) -> Result<()>
where
    S: SettingsStore + Send + 'static,
{
    let taab = Taab::load(store).context("failed to load settings")?;
    let client = GistClient::from_config(config).context("invalid gist API URL")?;

    let mut host = Host::new(
        Arc::new(Mutex::new(taab)),
        RemoteConfigLoader::new(client),
        Opener::new(config.print_only),
    );

    match line {
        Some(line) => host.run_once(&line).await,
        None => host.run().await,
    }
}
