mod app;
mod config;
mod deck;
mod event;
mod logging;
mod ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use deck::catalog::Catalog;
use deck::topic::TopicAxis;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "topicdeck")]
#[command(about = "A terminal browser for stand-up comedy specials, filtered by topic")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/topicdeck/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Card catalog JSON (overrides `catalog` in the config)
  #[arg(short = 'f', long)]
  catalog: Option<PathBuf>,

  /// Topic id to filter by on startup
  #[arg(short, long)]
  topic: Option<String>,

  /// Write logs to this file instead of the data directory
  #[arg(long)]
  log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Flushes buffered log lines on drop
  let _log_guard = logging::init(args.log_file.as_deref())?;

  let config = config::Config::load(args.config.as_deref())?;

  let topic = args
    .topic
    .as_deref()
    .map(TopicAxis::parse)
    .transpose()
    .map_err(|e| eyre!("Invalid --topic: {}", e))?;

  let catalog_path = config.catalog_path(args.catalog.as_deref())?;
  let cards = Catalog::load(&catalog_path, config.threshold)?;

  let mut app = app::App::new(&config, cards, topic.as_ref())?;
  app.run().await?;

  info!("exiting");
  Ok(())
}
