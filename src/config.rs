use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use serde::Deserialize;
use tracing::info;

use crate::{cli::Cli, utils::get_config_dir};

const CONFIG: &str = include_str!("../.config/config.json5");

const MIN_SIDEBAR_WIDTH: u16 = 10;
const MAX_SIDEBAR_WIDTH: u16 = 60;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub dataset: Option<PathBuf>,
  pub tick_rate: f64,
  pub frame_rate: f64,
  /// Percentage of the terminal width given to the sidebar.
  pub sidebar_width: u16,
}

impl Config {
  /// The configuration shipped with the binary.
  pub fn embedded() -> Result<Self> {
    json5::from_str(CONFIG).map_err(|e| eyre!("Invalid embedded config: {}", e))
  }

  pub fn new() -> Result<Self> {
    let defaults = Self::embedded()?;
    let config_dir = get_config_dir();
    let mut builder = config::Config::builder()
      .set_default("tick_rate", defaults.tick_rate)?
      .set_default("frame_rate", defaults.frame_rate)?
      .set_default("sidebar_width", defaults.sidebar_width as i64)?;

    let config_files = [
      ("config.json5", config::FileFormat::Json5),
      ("config.json", config::FileFormat::Json),
      ("config.yaml", config::FileFormat::Yaml),
      ("config.toml", config::FileFormat::Toml),
      ("config.ini", config::FileFormat::Ini),
    ];
    let mut found_config = false;
    for (file, format) in &config_files {
      let path = config_dir.join(file);
      found_config = found_config || path.exists();
      builder = builder.add_source(config::File::from(path).format(*format).required(false));
    }
    if !found_config {
      info!("No configuration file found in {}, using defaults", config_dir.display());
    }

    let mut cfg: Self = builder.build()?.try_deserialize()?;
    if cfg.dataset.is_none() {
      cfg.dataset = defaults.dataset;
    }
    Ok(cfg.normalized())
  }

  /// Command line arguments take precedence over configuration files.
  pub fn merge_cli(mut self, cli: &Cli) -> Self {
    if let Some(dataset) = &cli.dataset {
      self.dataset = Some(dataset.clone());
    }
    if let Some(tick_rate) = cli.tick_rate {
      self.tick_rate = tick_rate;
    }
    if let Some(frame_rate) = cli.frame_rate {
      self.frame_rate = frame_rate;
    }
    self.normalized()
  }

  fn normalized(mut self) -> Self {
    self.sidebar_width = self.sidebar_width.clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH);
    if self.tick_rate <= 0.0 {
      self.tick_rate = 4.0;
    }
    if self.frame_rate <= 0.0 {
      self.frame_rate = 30.0;
    }
    self
  }
}
