use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  prelude::*,
  widgets::{Block, Borders, Paragraph, Wrap},
};

use super::Component;
use crate::{action::Action, tui::Frame};

#[derive(Default)]
pub struct ErrorView {
  message: Option<String>,
  scroll: u16,
  last_height: u16,
}

impl ErrorView {
  pub fn set_message(&mut self, message: String) {
    self.message = Some(message);
    self.scroll = 0;
  }

  pub fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }

  fn has_scrolled_to_bottom(&self) -> bool {
    match &self.message {
      Some(message) => {
        let total_lines = message.lines().count() as u16;
        self.scroll + self.last_height >= total_lines
      },
      None => false,
    }
  }
}

#[async_trait::async_trait]
impl Component for ErrorView {
  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    self.last_height = area.height.saturating_sub(2);
    let message = self.message.clone().unwrap_or_default();
    let paragraph = Paragraph::new(message)
      .block(Block::default().title("Error").style(Style::default().fg(Color::Red)).borders(Borders::ALL))
      .wrap(Wrap { trim: false })
      .scroll((self.scroll, 0));

    frame.render_widget(paragraph, area);
    Ok(())
  }

  async fn handle_key_events(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
    let action = match key.code {
      KeyCode::Up | KeyCode::Char('k') => {
        if self.scroll > 0 {
          self.scroll -= 1;
        }
        None
      },
      KeyCode::Down | KeyCode::Char('j') => {
        if !self.has_scrolled_to_bottom() {
          self.scroll += 1;
        }
        None
      },
      _ => {
        self.scroll = 0;
        self.message = None;
        self.last_height = 0;
        Some(Action::ExitError)
      },
    };
    Ok(action)
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    components::test_utils::{count_occurrences, render_to_lines},
    tui::Event,
  };

  fn key(code: KeyCode) -> Option<Event> {
    Some(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
  }

  #[tokio::test]
  async fn test_any_other_key_exits() {
    let mut view = ErrorView::default();
    view.set_message("Failed to load dataset".to_string());

    let action = view.handle_events(key(KeyCode::Esc)).await.unwrap();

    assert_eq!(action, Some(Action::ExitError));
    assert_eq!(view.message(), None);
  }

  #[tokio::test]
  async fn test_scrolling_keeps_message() {
    let mut view = ErrorView::default();
    view.set_message("line 1\nline 2\nline 3".to_string());
    render_to_lines(30, 3, |f| {
      let area = f.area();
      view.draw(f, area).unwrap();
    });

    assert_eq!(view.handle_events(key(KeyCode::Down)).await.unwrap(), None);
    assert_eq!(view.scroll, 1);
    assert_eq!(view.handle_events(key(KeyCode::Up)).await.unwrap(), None);
    assert_eq!(view.scroll, 0);
    assert_eq!(view.message(), Some("line 1\nline 2\nline 3"));
  }

  #[test]
  fn test_draw_shows_message() {
    let mut view = ErrorView::default();
    view.set_message("Failed to load dataset".to_string());

    let lines = render_to_lines(40, 4, |f| {
      let area = f.area();
      view.draw(f, area).unwrap();
    });

    assert_eq!(count_occurrences(&lines, "Error"), 1);
    assert_eq!(count_occurrences(&lines, "Failed to load dataset"), 1);
  }
}
