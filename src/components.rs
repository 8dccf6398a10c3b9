use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::{
  action::Action,
  tui::{Event, Frame},
};

pub mod error_view;
pub mod instruction_footer;
pub mod pill_selector;
pub mod sidebar;
pub mod variable_detail;

#[async_trait::async_trait]
pub trait Component: Send + Sync {
  /// Handle incoming events and produce actions if necessary.
  ///
  /// # Arguments
  ///
  /// * `event` - An optional event to be processed.
  ///
  /// # Returns
  ///
  /// * `Result<Option<Action>>` - An action to be processed or none.
  async fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    match event {
      Some(Event::Key(key_event)) => self.handle_key_events(key_event).await,
      _ => Ok(None),
    }
  }

  /// Handle key events and produce actions if necessary.
  ///
  /// # Arguments
  ///
  /// * `key` - A key event to be processed.
  ///
  /// # Returns
  ///
  /// * `Result<Option<Action>>` - An action to be processed or none.
  async fn handle_key_events(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
    Ok(None)
  }

  /// Update the state of the component based on a received action.
  ///
  /// # Arguments
  ///
  /// * `action` - An action that may modify the state of the component.
  ///
  /// # Returns
  ///
  /// * `Result<Option<Action>>` - An action to be processed or none.
  async fn update(&mut self, _action: Action) -> Result<Option<Action>> {
    Ok(None)
  }

  /// Render the component on the screen. (REQUIRED)
  ///
  /// # Arguments
  ///
  /// * `f` - A frame used for rendering.
  /// * `area` - The area in which the component should be drawn.
  ///
  /// # Returns
  ///
  /// * `Result<()>` - An Ok result or an error.
  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()>;
}

/// A view whose data is owned by its parent and handed in on every call.
///
/// Unlike a [`Component`], a view keeps no copy of the data it renders. Any state
/// it holds is purely presentational (a cursor, a scroll offset).
pub trait View {
  type Props<'a>
  where
    Self: 'a;

  fn render(&mut self, frame: &mut Frame<'_>, area: Rect, props: Self::Props<'_>);

  fn handle_key_event(&mut self, key: KeyEvent, props: Self::Props<'_>) -> Result<Option<Action>>;
}
