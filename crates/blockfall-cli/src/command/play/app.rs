use std::time::Duration;

use blockfall_engine::GameSession;
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    input::{self, Action},
    tui::{App, RenderMode, Tui},
    view::widgets::{KeyBindingDisplay, SessionDisplay},
};

const FPS: f64 = 60.0;

/// Interactive game: keys drive the session, ticks feed it wall-clock time.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Command(command) => _ = self.session.apply(command),
            Action::Start => self.session.start(),
            Action::TogglePause => self.session.toggle_pause(),
            Action::Reset => self.session.reset(),
            Action::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(FPS);
        tui.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(action) = event.as_key_event().and_then(input::map_key) {
            self.handle_action(action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let session_display = SessionDisplay::new(&snapshot, true);
        let help = KeyBindingDisplay::for_state(snapshot.state);

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(&session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        // the session logs landings and game over itself
        _ = self.session.advance(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{SessionConfig, SessionState};
    use crossterm::event::{KeyCode, KeyEvent};

    use super::*;

    fn app() -> PlayApp {
        let config = SessionConfig {
            seed: Some("00000000000000000000000000000007".parse().unwrap()),
            ..SessionConfig::default()
        };
        PlayApp::new(GameSession::new(config).unwrap())
    }

    fn key(app: &mut PlayApp, code: KeyCode) {
        app.handle_event(&mut Tui::new(), Event::Key(KeyEvent::from(code)));
    }

    #[test]
    fn test_keys_drive_session() {
        let mut app = app();
        key(&mut app, KeyCode::Left);
        assert_eq!(app.session().state(), SessionState::Idle);

        key(&mut app, KeyCode::Enter);
        assert_eq!(app.session().state(), SessionState::Running);
        let column = app.session().active_piece().unwrap().column();
        key(&mut app, KeyCode::Char('a'));
        assert_eq!(app.session().active_piece().unwrap().column(), column - 1);

        key(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session().state(), SessionState::Paused);
        key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.session().active_piece().unwrap().column(), column - 1);
        key(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session().state(), SessionState::Running);

        key(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_update_feeds_elapsed_time() {
        let mut app = app();
        app.update(&mut Tui::new(), Duration::from_secs(1));
        assert!(app.session().active_piece().is_none());

        key(&mut app, KeyCode::Enter);
        app.update(&mut Tui::new(), Duration::from_millis(400));
        assert_eq!(app.session().active_piece().unwrap().row(), 0);
        app.update(&mut Tui::new(), Duration::from_millis(400));
        assert_eq!(app.session().active_piece().unwrap().row(), 1);
    }
}
