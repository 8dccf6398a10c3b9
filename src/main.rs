use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;

use crate::{
  app::App,
  cli::Cli,
  config::Config,
  dataset::DelimitedFileSource,
  utils::{initialize_logging, initialize_panic_handler},
};

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod dataset;
pub mod dispatch;
pub mod error;
pub mod mode;
pub mod tui;
pub mod utils;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let cli = Cli::parse();
  let config = Config::new()?.merge_cli(&cli);

  let Some(path) = config.dataset.clone() else {
    eprintln!("Error: No dataset given. Pass --dataset <PATH> or set `dataset` in the config file.");
    std::process::exit(1);
  };
  let source = match DelimitedFileSource::open(&path).await {
    Ok(source) => source,
    Err(e) => {
      eprintln!("Error: {}", e);
      std::process::exit(1);
    },
  };

  let mut app = App::new(config, Arc::new(source))?;
  app.run().await?;

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
