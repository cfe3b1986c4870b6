//! Main application orchestrator

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;

use crate::config::Config;
use crate::core::events::{Event, EventHandler, EventResult, KeyBindings};
use crate::core::monitor::Monitor;
use crate::core::state::{AppMode, AppState};
use crate::integrations::ping::PingProbe;
use crate::integrations::system::SystemMonitor;
use crate::ui::renderer::Renderer;
use crate::ui::theme::Theme;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
    monitor: Monitor,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = Terminal::new(backend)?;

        let theme = Theme::from_name(&config.display.theme);
        let state = AppState::new(
            theme,
            config.general.history_capacity,
            config.probe.host.clone(),
            config.tick_interval(),
        );

        let monitor = Monitor::new(
            SystemMonitor::new(),
            PingProbe::new(config.probe.host.clone(), config.probe_timeout()),
        );

        Ok(Self {
            terminal,
            state,
            monitor,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.setup_terminal()?;

        let mut events = EventHandler::new(self.state.interval);

        // Frame the panels before the first probe returns
        let result = match self.render() {
            Ok(()) => self.event_loop(&mut events).await,
            Err(e) => Err(e),
        };

        self.shutdown()?;
        result
    }

    fn setup_terminal(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide,
        )?;
        self.terminal.clear()?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show,
        )?;
        Ok(())
    }

    async fn event_loop(&mut self, events: &mut EventHandler) -> Result<()> {
        loop {
            let Some(event) = events.next().await else {
                break;
            };

            match self.handle_event(event).await? {
                EventResult::Continue => {}
                EventResult::Quit => break,
            }
        }
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> Result<EventResult> {
        match event {
            Event::Key(key) => {
                let result = handle_key(&mut self.state, key);
                self.render()?;
                Ok(result)
            }
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "terminal resized");
                self.render()?;
                Ok(EventResult::Continue)
            }
            Event::Tick => {
                self.tick().await;
                self.render()?;
                Ok(EventResult::Continue)
            }
        }
    }

    async fn tick(&mut self) {
        let snapshot = self.monitor.tick(&mut self.state.history).await;
        tracing::trace!(
            tick = snapshot.tick,
            cpu = snapshot.cpu_percent,
            ram = snapshot.ram_percent,
            disk = snapshot.disk_percent,
            latency_ms = ?snapshot.latency_ms,
            "sampled"
        );
        self.state.snapshot = Some(snapshot);
    }

    fn render(&mut self) -> Result<()> {
        let state = &self.state;
        self.terminal.draw(|frame| {
            Renderer::render(frame, state);
        })?;
        Ok(())
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> EventResult {
    if KeyBindings::quit_alt().matches(&key) {
        return EventResult::Quit;
    }

    match state.mode {
        AppMode::Dashboard => {
            if KeyBindings::quit().matches(&key) {
                return EventResult::Quit;
            }
            if KeyBindings::help().matches(&key) {
                state.mode = state.mode.toggle_help();
            }
        }
        AppMode::Help => {
            if KeyBindings::escape().matches(&key)
                || KeyBindings::help().matches(&key)
                || KeyBindings::quit().matches(&key)
            {
                state.mode = AppMode::Dashboard;
            }
        }
    }

    EventResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(
            Theme::default(),
            10,
            "8.8.8.8".to_string(),
            Duration::from_secs(1),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_from_dashboard() {
        let mut state = state();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), EventResult::Quit);
    }

    #[test]
    fn q_closes_help_instead_of_quitting() {
        let mut state = state();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.mode, AppMode::Help);

        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('q'))),
            EventResult::Continue
        );
        assert_eq!(state.mode, AppMode::Dashboard);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = state();
        state.mode = AppMode::Help;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, ctrl_c), EventResult::Quit);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut state = state();
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('x'))),
            EventResult::Continue
        );
        assert_eq!(state.mode, AppMode::Dashboard);
    }
}
