use super::action::Action;

/// Coarse lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Fresh layout, waiting for start
    #[default]
    Ready,
    /// Ticks are being applied
    Running,
    /// Frozen until resumed
    Paused,
    /// A fatal collision happened
    Ended,
}

impl GamePhase {
    /// Phase reached by applying a phase command, or `None` when the command
    /// is not legal from this phase.
    ///
    /// `Turn` never changes the phase and `Reset` is legal everywhere. The
    /// transition into `Ended` is not a command, it is produced by a tick.
    pub fn transition(self, action: Action) -> Option<GamePhase> {
        use GamePhase::*;

        match (self, action) {
            (Ready | Ended, Action::Start) => Some(Running),
            (Running, Action::Pause) => Some(Paused),
            (Paused, Action::Resume) => Some(Running),
            (_, Action::Reset) => Some(Ready),
            _ => None,
        }
    }

    /// What the single "primary" input (space bar) means in this phase
    pub fn primary_action(self) -> Action {
        match self {
            GamePhase::Ready | GamePhase::Ended => Action::Start,
            GamePhase::Running => Action::Pause,
            GamePhase::Paused => Action::Resume,
        }
    }

    /// What a dedicated pause key means in this phase, if anything
    pub fn pause_toggle(self) -> Option<Action> {
        match self {
            GamePhase::Running => Some(Action::Pause),
            GamePhase::Paused => Some(Action::Resume),
            GamePhase::Ready | GamePhase::Ended => None,
        }
    }

    pub fn is_running(self) -> bool {
        self == GamePhase::Running
    }

    pub fn label(self) -> &'static str {
        match self {
            GamePhase::Ready => "Ready",
            GamePhase::Running => "Running",
            GamePhase::Paused => "Paused",
            GamePhase::Ended => "Game Over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_legal_transitions() {
        assert_eq!(
            GamePhase::Ready.transition(Action::Start),
            Some(GamePhase::Running)
        );
        assert_eq!(
            GamePhase::Running.transition(Action::Pause),
            Some(GamePhase::Paused)
        );
        assert_eq!(
            GamePhase::Paused.transition(Action::Resume),
            Some(GamePhase::Running)
        );
        assert_eq!(
            GamePhase::Ended.transition(Action::Start),
            Some(GamePhase::Running)
        );
    }

    #[test]
    fn test_start_is_noop_while_playing() {
        assert_eq!(GamePhase::Running.transition(Action::Start), None);
        assert_eq!(GamePhase::Paused.transition(Action::Start), None);
    }

    #[test]
    fn test_illegal_pause_resume() {
        assert_eq!(GamePhase::Ready.transition(Action::Pause), None);
        assert_eq!(GamePhase::Ended.transition(Action::Pause), None);
        assert_eq!(GamePhase::Running.transition(Action::Resume), None);
        assert_eq!(GamePhase::Ready.transition(Action::Resume), None);
    }

    #[test]
    fn test_reset_from_anywhere() {
        for phase in [
            GamePhase::Ready,
            GamePhase::Running,
            GamePhase::Paused,
            GamePhase::Ended,
        ] {
            assert_eq!(phase.transition(Action::Reset), Some(GamePhase::Ready));
        }
    }

    #[test]
    fn test_turn_never_changes_phase() {
        assert_eq!(
            GamePhase::Running.transition(Action::Turn(Direction::Up)),
            None
        );
    }

    #[test]
    fn test_primary_action() {
        assert_eq!(GamePhase::Ready.primary_action(), Action::Start);
        assert_eq!(GamePhase::Running.primary_action(), Action::Pause);
        assert_eq!(GamePhase::Paused.primary_action(), Action::Resume);
        assert_eq!(GamePhase::Ended.primary_action(), Action::Start);
    }

    #[test]
    fn test_pause_toggle() {
        assert_eq!(GamePhase::Running.pause_toggle(), Some(Action::Pause));
        assert_eq!(GamePhase::Paused.pause_toggle(), Some(Action::Resume));
        assert_eq!(GamePhase::Ready.pause_toggle(), None);
        assert_eq!(GamePhase::Ended.pause_toggle(), None);
    }
}
