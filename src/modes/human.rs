use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GamePhase};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Renderer, grid_size_for};
use crate::session::GameSession;
use crate::storage::HighScoreStore;

/// Interactive play in the terminal
///
/// This is the scheduler around [`GameSession`]: it owns the tick timer, the
/// render timer and the terminal, and forwards key presses and resizes.
pub struct HumanMode<S: HighScoreStore> {
    session: GameSession<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Derive the grid from the terminal size instead of the configuration
    fit_to_terminal: bool,
    should_quit: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S, fit_to_terminal: bool) -> Self {
        Self {
            session: GameSession::new(config, store),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            fit_to_terminal,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        if self.fit_to_terminal {
            let size = terminal.size().context("Failed to read terminal size")?;
            self.handle_resize(size.width, size.height);
        }

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.session.tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event) == Some(GamePhase::Running) {
                                // Re-entering play: the first move comes one full tick later
                                tick_timer.reset();
                            }
                        }
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.session.is_ticking() {
                        self.session.tick();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.session.metrics_mut().update();
                    let (state, metrics) = (self.session.state(), self.session.metrics());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, state, metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle one terminal event, returning the new phase if it changed
    fn handle_event(&mut self, event: Event) -> Option<GamePhase> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return None;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::GameAction(action) => self.session.handle(action),
                    KeyAction::Primary => self.session.primary(),
                    KeyAction::TogglePause => {
                        let action = self.session.state().phase.pause_toggle()?;
                        self.session.handle(action)
                    }
                    KeyAction::Quit => {
                        self.should_quit = true;
                        None
                    }
                    KeyAction::None => None,
                }
            }
            Event::Resize(width, height) => {
                self.handle_resize(width, height);
                None
            }
            _ => None,
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        if !self.fit_to_terminal {
            return;
        }

        let (grid_width, grid_height) = grid_size_for(Rect::new(0, 0, width, height));
        self.session.resize(grid_width, grid_height);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::storage::MemoryHighScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode(fit: bool) -> HumanMode<MemoryHighScoreStore> {
        HumanMode::new(
            GameConfig::default(),
            MemoryHighScoreStore::with_high_score(40),
            fit,
        )
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode(false);
        assert_eq!(mode.session.state().phase, GamePhase::Ready);
        assert_eq!(mode.session.state().score, 0);
        assert_eq!(mode.session.state().high_score, 40);
    }

    #[test]
    fn test_space_starts_and_pauses() {
        let mut mode = mode(false);

        assert_eq!(
            mode.handle_event(key(KeyCode::Char(' '))),
            Some(GamePhase::Running)
        );
        assert_eq!(
            mode.handle_event(key(KeyCode::Char(' '))),
            Some(GamePhase::Paused)
        );
        assert_eq!(
            mode.handle_event(key(KeyCode::Char('p'))),
            Some(GamePhase::Running)
        );
    }

    #[test]
    fn test_pause_key_ignored_before_start() {
        let mut mode = mode(false);
        assert_eq!(mode.handle_event(key(KeyCode::Char('p'))), None);
        assert_eq!(mode.session.state().phase, GamePhase::Ready);
    }

    #[test]
    fn test_direction_keys_steer() {
        let mut mode = mode(false);
        mode.handle_event(key(KeyCode::Enter));
        mode.handle_event(key(KeyCode::Down));

        assert_eq!(mode.session.state().next_direction, Direction::Down);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut mode = mode(false);
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });

        assert_eq!(mode.handle_event(release), None);
        assert_eq!(mode.session.state().phase, GamePhase::Ready);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode(false);
        mode.handle_event(key(KeyCode::Char(' ')));
        mode.session.state_mut().score = 10;

        assert_eq!(
            mode.handle_event(key(KeyCode::Char('r'))),
            Some(GamePhase::Ready)
        );
        assert_eq!(mode.session.state().score, 0);
    }

    #[test]
    fn test_quit() {
        let mut mode = mode(false);
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_resize_only_when_fitting() {
        let mut fixed = mode(false);
        fixed.handle_event(Event::Resize(80, 24));
        assert_eq!(fixed.session.state().grid_width, 20);

        let mut fitted = mode(true);
        fitted.handle_event(Event::Resize(80, 24));
        assert_eq!(fitted.session.state().grid_width, 39);
        assert_eq!(fitted.session.state().grid_height, 16);
    }
}
