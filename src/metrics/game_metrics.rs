use std::time::{Duration, Instant};

/// Per-session statistics shown next to the board
pub struct GameMetrics {
    /// Start of the current uninterrupted stretch of play
    run_started: Option<Instant>,
    /// Play time accumulated before the current stretch
    banked_time: Duration,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub foods_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: None,
            banked_time: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            games_played: 0,
            foods_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.banked_time
            + self
                .run_started
                .map(|started| started.elapsed())
                .unwrap_or(Duration::ZERO);
    }

    pub fn on_game_start(&mut self) {
        self.banked_time = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
        self.foods_eaten = 0;
        self.run_started = Some(Instant::now());
    }

    /// Stop the clock without losing the time played so far
    pub fn on_pause(&mut self) {
        self.update();
        self.banked_time = self.elapsed_time;
        self.run_started = None;
    }

    pub fn on_resume(&mut self) {
        if self.run_started.is_none() {
            self.run_started = Some(Instant::now());
        }
    }

    pub fn on_food_eaten(&mut self) {
        self.foods_eaten += 1;
    }

    pub fn on_game_over(&mut self) {
        self.on_pause();
        self.games_played += 1;
    }

    /// Back to a blank clock, e.g. after a reset
    pub fn on_reset(&mut self) {
        self.run_started = None;
        self.banked_time = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
        self.foods_eaten = 0;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_games_played_counts_game_overs() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        metrics.on_food_eaten();
        metrics.on_food_eaten();
        metrics.on_game_over();

        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.foods_eaten, 2);

        metrics.on_game_start();
        assert_eq!(metrics.foods_eaten, 0);
        assert_eq!(metrics.games_played, 1);
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(30));
        metrics.on_pause();
        let paused_at = metrics.elapsed_time;
        assert!(paused_at.as_millis() >= 30);

        std::thread::sleep(Duration::from_millis(30));
        metrics.update();
        assert_eq!(metrics.elapsed_time, paused_at);

        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(10));
        metrics.update();
        assert!(metrics.elapsed_time > paused_at);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_clock_idle_before_start() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(10));
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
