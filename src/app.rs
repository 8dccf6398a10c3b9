use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::{
  action::Action,
  components::{
    Component, View,
    error_view::ErrorView,
    instruction_footer::InstructionFooter,
    sidebar::{Sidebar, SidebarProps},
    variable_detail::VariableDetail,
  },
  config::Config,
  dataset::DatasetSource,
  dispatch::ActionDispatcher,
  mode::{Focus, Mode},
  tui::{self, Frame, Tui},
};

pub struct App {
  pub config: Config,
  pub source: Arc<dyn DatasetSource>,
  /// Variable labels of the loaded dataset, passed down to the sidebar.
  pub options: Vec<String>,
  pub sidebar: Sidebar<String, ActionDispatcher>,
  pub detail: VariableDetail,
  pub error_view: ErrorView,
  pub footer: InstructionFooter,
  pub action_tx: UnboundedSender<Action>,
  pub action_rx: UnboundedReceiver<Action>,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  pub focus: Focus,
}

impl App {
  pub fn new(config: Config, source: Arc<dyn DatasetSource>) -> Result<Self> {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let sidebar = Sidebar::new(ActionDispatcher::new(action_tx.clone()));
    Ok(Self {
      config,
      source,
      options: Vec::new(),
      sidebar,
      detail: VariableDetail::default(),
      error_view: ErrorView::default(),
      footer: InstructionFooter::default(),
      action_tx,
      action_rx,
      should_quit: false,
      should_suspend: false,
      mode: Mode::Default,
      focus: Focus::Sidebar,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    let mut tui = Tui::new()?.tick_rate(self.config.tick_rate).frame_rate(self.config.frame_rate);
    tui.enter()?;

    self.action_tx.send(Action::Refresh)?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Error(message) => self.action_tx.send(Action::Error(message))?,
          tui::Event::Tick => self.action_tx.send(Action::Tick)?,
          tui::Event::Render => self.action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => self.action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(action) = self.handle_key_event(key).await? {
              self.action_tx.send(action)?;
            }
          },
        }
      }

      while let Ok(action) = self.action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }
        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui)?;
          },
          Action::Render => self.render(&mut tui)?,
          _ => {},
        }
        if let Some(action) = self.update(action).await? {
          self.action_tx.send(action)?
        };
      }
      if self.should_suspend {
        tui.suspend()?;
        self.action_tx.send(Action::Resume)?;
        tui = Tui::new()?.tick_rate(self.config.tick_rate).frame_rate(self.config.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  fn render(&mut self, tui: &mut Tui) -> Result<()> {
    let action_tx = self.action_tx.clone();
    tui.draw(|f| {
      let area = f.area();
      if let Err(e) = self.draw(f, area) {
        let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", e)));
      }
    })?;
    Ok(())
  }

  pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    if let KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } = key {
      return Ok(Some(Action::Quit));
    }
    if self.mode == Mode::Error {
      return self.error_view.handle_key_events(key).await;
    }
    let action = match key {
      KeyEvent { code: KeyCode::Char('q'), .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('z'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Suspend),
      KeyEvent { code: KeyCode::Char('r'), .. } => Some(Action::Refresh),
      KeyEvent { code: KeyCode::Tab, .. } => Some(Action::FocusNext),
      _ => match self.focus {
        Focus::Sidebar => self.sidebar.handle_key_event(key, SidebarProps { options: &self.options })?,
        Focus::Detail => match key.code {
          KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
          KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
          _ => None,
        },
      },
    };
    Ok(action)
  }

  pub async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match &action {
      Action::Quit => self.should_quit = true,
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      Action::Refresh => self.load_dataset(),
      Action::FocusNext => {
        self.focus = self.focus.next();
        return Ok(Some(Action::Render));
      },
      Action::DatasetLoaded(dataset) => {
        info!("Loaded {} variables from '{}'", dataset.variables.len(), dataset.name);
        self.options = dataset.variable_labels();
      },
      Action::Error(message) => {
        error!("{}", message);
        self.error_view.set_message(message.clone());
        self.mode = Mode::Error;
        return Ok(Some(Action::Render));
      },
      Action::ExitError => {
        self.mode = Mode::Default;
        return Ok(Some(Action::Render));
      },
      _ => {},
    }
    self.detail.update(action).await
  }

  fn load_dataset(&self) {
    let source = self.source.clone();
    let tx = self.action_tx.clone();
    tokio::spawn(async move {
      let action = match source.load().await {
        Ok(dataset) => Action::DatasetLoaded(dataset),
        Err(err) => {
          error!("Failed to load dataset: {}", err);
          Action::Error(format!("Failed to load dataset: {}", err))
        },
      };
      if let Err(e) = tx.send(action) {
        error!("Failed to send action: {}", e);
      }
    });
  }

  fn instructions(&self) -> Vec<&'static str> {
    match (self.mode, self.focus) {
      (Mode::Error, _) => vec!["↑/↓: scroll", "any other key: dismiss"],
      (Mode::Default, Focus::Sidebar) => vec!["←/→: move", "enter: choose", "tab: details", "r: reload", "q: quit"],
      (Mode::Default, Focus::Detail) => vec!["↑/↓: scroll", "tab: variables", "r: reload", "q: quit"],
    }
  }

  pub fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(3)])
      .split(area);
    let instructions = self.instructions();

    if self.mode == Mode::Error {
      self.error_view.draw(frame, rows[0])?;
    } else {
      let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(self.config.sidebar_width), Constraint::Min(1)])
        .split(rows[0]);
      self.sidebar.render(frame, columns[0], SidebarProps { options: &self.options });
      self.detail.draw(frame, columns[1])?;
    }
    self.footer.render(frame, rows[1], &instructions);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    components::test_utils::{count_occurrences, render_to_lines},
    dataset::mock_dataset_source::MockDatasetSource,
  };

  fn app(fail: bool) -> App {
    let config = Config::embedded().unwrap();
    App::new(config, Arc::new(MockDatasetSource { fail })).unwrap()
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  /// Feeds every queued action back through `update` until the channel is drained.
  async fn drain(app: &mut App) -> Vec<Action> {
    let mut seen = Vec::new();
    while let Ok(action) = app.action_rx.try_recv() {
      seen.push(action.clone());
      if let Some(next) = app.update(action).await.unwrap() {
        app.action_tx.send(next).unwrap();
      }
    }
    seen
  }

  async fn loaded_app() -> App {
    let mut app = app(false);
    app.update(Action::Refresh).await.unwrap();
    let action = app.action_rx.recv().await.unwrap();
    app.update(action).await.unwrap();
    app
  }

  #[tokio::test]
  async fn test_refresh_loads_options() {
    let app = loaded_app().await;

    assert_eq!(app.options, vec!["age".to_string(), "occupation".to_string()]);
  }

  #[tokio::test]
  async fn test_failed_load_shows_error() {
    let mut app = app(true);
    app.update(Action::Refresh).await.unwrap();
    let action = app.action_rx.recv().await.unwrap();

    assert!(matches!(&action, Action::Error(message) if message.starts_with("Failed to load dataset")));
    app.update(action).await.unwrap();
    assert_eq!(app.mode, Mode::Error);

    let exit = app.handle_key_event(key(KeyCode::Esc)).await.unwrap();
    assert_eq!(exit, Some(Action::ExitError));
    app.update(Action::ExitError).await.unwrap();
    assert_eq!(app.mode, Mode::Default);
  }

  #[tokio::test]
  async fn test_ctrl_c_quits_while_error_is_shown() {
    let mut app = app(false);
    app.update(Action::Error("Failed to load dataset: gone".to_string())).await.unwrap();
    assert_eq!(app.mode, Mode::Error);

    let action = app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).await.unwrap();

    assert_eq!(action, Some(Action::Quit));
    app.update(Action::Quit).await.unwrap();
    assert!(app.should_quit);
    assert_eq!(app.mode, Mode::Error);
  }

  #[tokio::test]
  async fn test_sidebar_selection_reaches_detail() {
    let mut app = loaded_app().await;

    assert_eq!(app.handle_key_event(key(KeyCode::Right)).await.unwrap(), None);
    assert_eq!(app.handle_key_event(key(KeyCode::Enter)).await.unwrap(), None);
    let seen = drain(&mut app).await;

    assert_eq!(seen.first(), Some(&Action::ChooseVariable("occupation".to_string())));
    assert_eq!(app.detail.chosen(), Some("occupation"));
  }

  #[tokio::test]
  async fn test_global_keys() {
    let mut app = app(false);

    assert_eq!(app.handle_key_event(key(KeyCode::Char('q'))).await.unwrap(), Some(Action::Quit));
    assert_eq!(
      app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).await.unwrap(),
      Some(Action::Quit)
    );
    assert_eq!(app.handle_key_event(key(KeyCode::Char('r'))).await.unwrap(), Some(Action::Refresh));
    assert_eq!(app.handle_key_event(key(KeyCode::Tab)).await.unwrap(), Some(Action::FocusNext));
  }

  #[tokio::test]
  async fn test_focus_detail_scrolls() {
    let mut app = app(false);
    app.update(Action::FocusNext).await.unwrap();

    assert_eq!(app.focus, Focus::Detail);
    assert_eq!(app.handle_key_event(key(KeyCode::Down)).await.unwrap(), Some(Action::ScrollDown));
    assert_eq!(app.handle_key_event(key(KeyCode::Up)).await.unwrap(), Some(Action::ScrollUp));
  }

  #[tokio::test]
  async fn test_quit_and_suspend_flags() {
    let mut app = app(false);

    app.update(Action::Suspend).await.unwrap();
    assert!(app.should_suspend);
    app.update(Action::Resume).await.unwrap();
    assert!(!app.should_suspend);
    app.update(Action::Quit).await.unwrap();
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_draw_layout() {
    let mut app = loaded_app().await;
    app.update(Action::ChooseVariable("age".to_string())).await.unwrap();

    let lines = render_to_lines(100, 12, |f| {
      let area = f.area();
      app.draw(f, area).unwrap();
    });

    assert_eq!(count_occurrences(&lines, "Variables"), 1);
    assert_eq!(count_occurrences(&lines, " occupation "), 1);
    assert_eq!(count_occurrences(&lines, "Values (2)"), 1);
    assert_eq!(count_occurrences(&lines, "q: quit"), 1);
  }
}
