use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
  #[default]
  Default,
  Error,
}

/// The pane receiving key events while in [`Mode::Default`].
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Focus {
  #[default]
  Sidebar,
  Detail,
}

impl Focus {
  pub fn next(self) -> Self {
    match self {
      Focus::Sidebar => Focus::Detail,
      Focus::Detail => Focus::Sidebar,
    }
  }
}
