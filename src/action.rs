use serde::{Deserialize, Serialize};
use strum::Display;

use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  ChooseVariable(String),
  DatasetLoaded(Dataset),
  Error(String),
  ExitError,
  FocusNext,
  Quit,
  Refresh,
  Render,
  Resize(u16, u16),
  Resume,
  ScrollDown,
  ScrollUp,
  Suspend,
  Tick,
}
