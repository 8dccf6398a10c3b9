use ratatui::{
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

#[derive(Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  /// Renders the footer with the provided instructions.
  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, instructions: &[&'static str]) {
    if instructions.is_empty() {
      return;
    }

    let text = instructions.join(" | ");
    let paragraph =
      Paragraph::new(text).block(Block::default().borders(Borders::ALL)).style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::components::test_utils::render_to_lines;

  #[test]
  fn test_instructions_are_joined() {
    let footer = InstructionFooter::default();

    let lines = render_to_lines(24, 3, |f| {
      let area = f.area();
      footer.render(f, area, &["q: quit", "r: reload"]);
    });

    assert_eq!(lines[1], "│q: quit | r: reload   │");
  }
}
