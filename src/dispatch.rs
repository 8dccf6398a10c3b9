use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::action::Action;

/// Receives the application actions triggered from dataset views.
pub trait DatasetActions<V>: Send + Sync {
  /// Notifies that the user picked `value`. Nothing is returned to the caller.
  fn choose_variable(&self, value: V);
}

/// Turns dataset actions into [`Action`]s on the application's action channel.
#[derive(Clone)]
pub struct ActionDispatcher {
  tx: UnboundedSender<Action>,
}

impl ActionDispatcher {
  pub fn new(tx: UnboundedSender<Action>) -> Self {
    ActionDispatcher { tx }
  }
}

impl DatasetActions<String> for ActionDispatcher {
  fn choose_variable(&self, value: String) {
    if let Err(e) = self.tx.send(Action::ChooseVariable(value)) {
      error!("Failed to send action: {}", e);
    }
  }
}
