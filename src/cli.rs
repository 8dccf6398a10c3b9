use std::path::PathBuf;

use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug, Default)]
#[command(author, version = version(), about)]
pub struct Cli {
  /// Path to a dataset descriptor (JSON) or directly to a CSV/TSV file
  #[arg(short, long, value_name = "PATH")]
  pub dataset: Option<PathBuf>,

  /// Tick rate, i.e. number of ticks per second
  #[arg(short, long, value_name = "FLOAT")]
  pub tick_rate: Option<f64>,

  /// Frame rate, i.e. number of frames per second
  #[arg(short, long, value_name = "FLOAT")]
  pub frame_rate: Option<f64>,
}
