use std::{fmt::Display, marker::PhantomData};

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
  layout::Rect,
  style::{Modifier, Style},
  widgets::{Block, Borders, Padding},
};

use super::{View, pill_selector::PillSelector};
use crate::{action::Action, dispatch::DatasetActions, tui::Frame};

pub const SIDEBAR_HEADING: &str = "Variables";

/// Inputs of the sidebar. The options are owned by the parent and only borrowed here.
pub struct SidebarProps<'a, V> {
  pub options: &'a [V],
}

/// Panel listing the dataset variables as pills.
///
/// Picking a pill forwards the value, untouched, to the injected [`DatasetActions`].
/// The sidebar keeps nothing derived from its options between calls.
pub struct Sidebar<V, A> {
  actions: A,
  selector: PillSelector,
  _value: PhantomData<fn(V)>,
}

impl<V, A> Sidebar<V, A>
where
  V: Clone + Display,
  A: DatasetActions<V>,
{
  pub fn new(actions: A) -> Self {
    Sidebar { actions, selector: PillSelector::new(), _value: PhantomData }
  }

  /// The options handed to the pill selector.
  pub fn selector_options<'a>(&self, props: &SidebarProps<'a, V>) -> &'a [V] {
    props.options
  }

  /// Selection handler given to the pill selector.
  pub fn on_selected(&self, value: V) {
    self.actions.choose_variable(value);
  }
}

impl<V, A> View for Sidebar<V, A>
where
  V: Clone + Display,
  A: DatasetActions<V>,
{
  type Props<'a>
    = SidebarProps<'a, V>
  where
    Self: 'a;

  fn render(&mut self, frame: &mut Frame<'_>, area: Rect, props: SidebarProps<'_, V>) {
    let block = Block::default()
      .title(SIDEBAR_HEADING)
      .title_style(Style::default().add_modifier(Modifier::BOLD))
      .borders(Borders::ALL)
      .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let options = self.selector_options(&props);
    self.selector.render(frame, inner, options);
  }

  fn handle_key_event(&mut self, key: KeyEvent, props: SidebarProps<'_, V>) -> Result<Option<Action>> {
    let options = self.selector_options(&props);
    if let Some(value) = self.selector.handle_key_event(key, options) {
      self.on_selected(value);
    }
    Ok(None)
  }
}
