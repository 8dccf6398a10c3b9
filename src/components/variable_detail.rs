use color_eyre::eyre::Result;
use ratatui::{
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::warn;

use super::Component;
use crate::{
  action::Action,
  dataset::{Dataset, Variable},
  tui::Frame,
};

const HINT: &str = "Pick a variable in the sidebar and press Enter";

/// Shows the variable last chosen through the sidebar.
#[derive(Debug, Default)]
pub struct VariableDetail {
  dataset: Option<Dataset>,
  chosen: Option<String>,
  scroll: u16,
  last_height: u16,
}

impl VariableDetail {
  pub fn chosen(&self) -> Option<&str> {
    self.chosen.as_deref()
  }

  fn chosen_variable(&self) -> Option<&Variable> {
    let chosen = self.chosen.as_deref()?;
    self.dataset.as_ref()?.variable(chosen)
  }

  fn lines(&self) -> Vec<Line<'_>> {
    let Some(chosen) = self.chosen.as_deref() else {
      return vec![Line::styled(HINT, Style::default().add_modifier(Modifier::DIM))];
    };
    let Some(variable) = self.chosen_variable() else {
      return vec![Line::styled(format!("Variable '{}' not found", chosen), Style::default().fg(Color::Red))];
    };

    let mut lines = vec![
      Line::styled(variable.label.clone(), Style::default().add_modifier(Modifier::BOLD)),
      Line::raw(variable.description.clone()),
    ];
    if let Some(description) = self.dataset.as_ref().and_then(|dataset| dataset.metadata_for(&variable.label)) {
      if description != variable.label {
        lines.push(Line::styled(description.to_string(), Style::default().add_modifier(Modifier::ITALIC)));
      }
    }
    lines.push(Line::default());
    lines.push(Line::styled(
      format!("Values ({})", variable.values.len()),
      Style::default().add_modifier(Modifier::UNDERLINED),
    ));
    lines.extend(variable.values.iter().map(|value| {
      Line::from(vec![
        Span::styled(format!("{:>6}", value.count), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::raw(value.label.clone()),
      ])
    }));
    lines
  }

  fn scroll_down(&mut self) {
    let total = self.lines().len() as u16;
    if self.scroll + self.last_height < total {
      self.scroll += 1;
    }
  }
}

#[async_trait::async_trait]
impl Component for VariableDetail {
  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::DatasetLoaded(dataset) => {
        self.dataset = Some(dataset);
        self.scroll = 0;
        Ok(Some(Action::Render))
      },
      Action::ChooseVariable(label) => {
        if self.dataset.as_ref().is_some_and(|dataset| dataset.variable(&label).is_none()) {
          warn!("Chose unknown variable '{}'", label);
        }
        self.chosen = Some(label);
        self.scroll = 0;
        Ok(Some(Action::Render))
      },
      Action::ScrollUp => {
        self.scroll = self.scroll.saturating_sub(1);
        Ok(Some(Action::Render))
      },
      Action::ScrollDown => {
        self.scroll_down();
        Ok(Some(Action::Render))
      },
      _ => Ok(None),
    }
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
    self.last_height = area.height.saturating_sub(2);
    let paragraph = Paragraph::new(self.lines())
      .block(Block::default().title("Variable").borders(Borders::ALL))
      .wrap(Wrap { trim: false })
      .scroll((self.scroll, 0));
    frame.render_widget(paragraph, area);
    Ok(())
  }
}
