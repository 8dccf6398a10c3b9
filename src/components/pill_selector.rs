use std::fmt::Display;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use crate::tui::Frame;

const PILL_GAP: u16 = 1;

/// Renders options as a wrapped row of pills and reports which one the user picks.
///
/// The only state kept here is the cursor. Options are borrowed on every call, so
/// the cursor is clamped each time in case the list shrank in between.
#[derive(Debug, Default)]
pub struct PillSelector {
  cursor: usize,
}

impl PillSelector {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  fn clamp_cursor(&mut self, len: usize) {
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  /// Moves the cursor and returns the chosen option on `Enter` or `Space`.
  pub fn handle_key_event<V: Clone>(&mut self, key: KeyEvent, options: &[V]) -> Option<V> {
    if options.is_empty() {
      self.cursor = 0;
      return None;
    }
    self.clamp_cursor(options.len());
    let last = options.len() - 1;
    match key.code {
      KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => {
        self.cursor = if self.cursor == 0 { last } else { self.cursor - 1 };
        None
      },
      KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j') => {
        self.cursor = if self.cursor >= last { 0 } else { self.cursor + 1 };
        None
      },
      KeyCode::Home => {
        self.cursor = 0;
        None
      },
      KeyCode::End => {
        self.cursor = last;
        None
      },
      KeyCode::Enter | KeyCode::Char(' ') => options.get(self.cursor).cloned(),
      _ => None,
    }
  }

  pub fn render<V: Display>(&mut self, frame: &mut Frame<'_>, area: Rect, options: &[V]) {
    if options.is_empty() {
      let empty = Paragraph::new("No variables").style(Style::default().add_modifier(Modifier::DIM));
      frame.render_widget(empty, area);
      return;
    }
    self.clamp_cursor(options.len());

    let labels: Vec<String> =
      options.iter().map(|option| fit_label(&format!(" {} ", option), area.width as usize)).collect();
    let widths: Vec<u16> = labels.iter().map(|label| Span::raw(label.as_str()).width() as u16).collect();
    let rows = layout_pills(&widths, area.width);

    let mut cursor_row = 0;
    let lines: Vec<Line> = rows
      .iter()
      .enumerate()
      .map(|(row_index, row)| {
        let mut spans = Vec::with_capacity(row.len() * 2);
        for (position, index) in row.iter().enumerate() {
          if position > 0 {
            spans.push(Span::raw(" ".repeat(PILL_GAP as usize)));
          }
          if *index == self.cursor {
            cursor_row = row_index;
          }
          spans.push(Span::styled(labels[*index].clone(), pill_style(*index == self.cursor)));
        }
        Line::from(spans)
      })
      .collect();

    let scroll = (cursor_row as u16).saturating_sub(area.height.saturating_sub(1));
    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
  }
}

fn pill_style(highlighted: bool) -> Style {
  if highlighted {
    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::White).bg(Color::DarkGray)
  }
}

/// Cuts a label down to `width` columns, ending it with an ellipsis, so every pill fits on one line.
fn fit_label(label: &str, width: usize) -> String {
  if Span::raw(label).width() <= width {
    return label.to_string();
  }
  let mut fitted = String::new();
  let mut used = 0;
  let mut buf = [0u8; 4];
  for c in label.chars() {
    let char_width = Span::raw(&*c.encode_utf8(&mut buf)).width();
    if used + char_width + 1 > width {
      break;
    }
    used += char_width;
    fitted.push(c);
  }
  if width > 0 {
    fitted.push('…');
  }
  fitted
}

/// Packs pills of the given widths into rows no wider than `width`.
/// A pill wider than a whole row gets a row of its own.
fn layout_pills(widths: &[u16], width: u16) -> Vec<Vec<usize>> {
  let mut rows: Vec<Vec<usize>> = Vec::new();
  let mut current: Vec<usize> = Vec::new();
  let mut used: u16 = 0;
  for (index, pill) in widths.iter().enumerate() {
    let needed = if current.is_empty() { *pill } else { used.saturating_add(PILL_GAP).saturating_add(*pill) };
    if !current.is_empty() && needed > width {
      rows.push(std::mem::take(&mut current));
      used = *pill;
    } else {
      used = needed;
    }
    current.push(index);
  }
  if !current.is_empty() {
    rows.push(current);
  }
  rows
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::components::test_utils::render_to_lines;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn options() -> Vec<String> {
    vec!["age".to_string(), "sex".to_string(), "occupation".to_string()]
  }

  #[test]
  fn test_layout_pills_wraps_rows() {
    assert_eq!(layout_pills(&[5, 5, 5], 11), vec![vec![0, 1], vec![2]]);
    assert_eq!(layout_pills(&[5, 5, 5], 100), vec![vec![0, 1, 2]]);
    assert_eq!(layout_pills(&[20, 3], 10), vec![vec![0], vec![1]]);
    assert!(layout_pills(&[], 10).is_empty());
  }

  #[test]
  fn test_navigation_wraps_around() {
    let mut selector = PillSelector::new();
    let options = options();

    assert_eq!(selector.handle_key_event(key(KeyCode::Left), &options), None);
    assert_eq!(selector.cursor(), 2);
    assert_eq!(selector.handle_key_event(key(KeyCode::Right), &options), None);
    assert_eq!(selector.cursor(), 0);
    selector.handle_key_event(key(KeyCode::End), &options);
    assert_eq!(selector.cursor(), 2);
    selector.handle_key_event(key(KeyCode::Home), &options);
    assert_eq!(selector.cursor(), 0);
  }

  #[test]
  fn test_enter_selects_option_under_cursor() {
    let mut selector = PillSelector::new();
    let options = options();

    selector.handle_key_event(key(KeyCode::Char('l')), &options);

    assert_eq!(selector.handle_key_event(key(KeyCode::Enter), &options), Some("sex".to_string()));
    assert_eq!(selector.handle_key_event(key(KeyCode::Char(' ')), &options), Some("sex".to_string()));
  }

  #[test]
  fn test_empty_options_never_select() {
    let mut selector = PillSelector::new();
    let options: Vec<String> = Vec::new();

    assert_eq!(selector.handle_key_event(key(KeyCode::Enter), &options), None);
    assert_eq!(selector.handle_key_event(key(KeyCode::Right), &options), None);
    assert_eq!(selector.cursor(), 0);
  }

  #[test]
  fn test_cursor_is_clamped_when_options_shrink() {
    let mut selector = PillSelector::new();
    selector.handle_key_event(key(KeyCode::End), &options());

    let shorter = vec!["age".to_string()];
    assert_eq!(selector.handle_key_event(key(KeyCode::Enter), &shorter), Some("age".to_string()));
  }

  #[test]
  fn test_render_shows_every_option() {
    let mut selector = PillSelector::new();
    let options = options();

    let lines = render_to_lines(14, 4, |f| {
      let area = f.area();
      selector.render(f, area, &options)
    });

    assert_eq!(lines[0], " age   sex    ");
    assert_eq!(lines[1], " occupation   ");
  }

  #[test]
  fn test_fit_label() {
    assert_eq!(fit_label(" age ", 8), " age ");
    assert_eq!(fit_label(" occupation ", 8), " occupa…");
    assert_eq!(fit_label(" age ", 0), "");
  }

  #[test]
  fn test_render_keeps_cursor_visible_past_wide_pill() {
    let mut selector = PillSelector::new();
    let options = vec!["age".to_string(), "occupation_of_father".to_string(), "sex".to_string()];
    selector.handle_key_event(key(KeyCode::End), &options);

    let lines = render_to_lines(8, 2, |f| {
      let area = f.area();
      selector.render(f, area, &options)
    });

    assert_eq!(lines, vec![" occupa…".to_string(), " sex    ".to_string()]);
  }

  #[test]
  fn test_render_empty_options() {
    let mut selector = PillSelector::new();
    let options: Vec<String> = Vec::new();

    let lines = render_to_lines(14, 2, |f| {
      let area = f.area();
      selector.render(f, area, &options)
    });

    assert_eq!(lines[0], "No variables  ");
  }
}
