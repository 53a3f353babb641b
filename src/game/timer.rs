//! Game clock, countdown with visual feedback levels, and time formatting.

use std::time::Duration;

use tracing::instrument;

/// Remaining seconds at or below which the countdown turns critical.
pub const CRITICAL_SECS: u64 = 10;
/// Remaining seconds at or below which the countdown shows a warning.
pub const WARNING_SECS: u64 = 30;

/// Count-up clock for a game; only advances while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameTimer {
    elapsed: Duration,
    paused: bool,
}

impl GameTimer {
    /// Running timer at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Running timer that starts from a previously saved value.
    pub fn from_elapsed(secs: u64) -> Self {
        Self {
            elapsed: Duration::from_secs(secs),
            paused: false,
        }
    }

    /// Adds `delta` unless paused.
    pub fn tick(&mut self, delta: Duration) {
        if !self.paused {
            self.elapsed += delta;
        }
    }

    /// Stops accumulating time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes accumulating time.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whole seconds elapsed.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Visual state of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerFeedback {
    /// Plenty of time left.
    Normal,
    /// Time is running low.
    Warning,
    /// Only a few seconds left.
    Critical,
    /// Time is up.
    Expired,
}

/// Countdown used by timed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    limit: Duration,
    timer: GameTimer,
}

impl Countdown {
    /// Countdown from `limit_secs`.
    pub fn new(limit_secs: u64) -> Self {
        Self {
            limit: Duration::from_secs(limit_secs),
            timer: GameTimer::new(),
        }
    }

    /// Countdown from `limit_secs` with `elapsed_secs` already spent.
    pub fn resumed(limit_secs: u64, elapsed_secs: u64) -> Self {
        Self {
            limit: Duration::from_secs(limit_secs),
            timer: GameTimer::from_elapsed(elapsed_secs),
        }
    }

    /// Advances the countdown.
    pub fn tick(&mut self, delta: Duration) {
        self.timer.tick(delta);
    }

    /// Pauses the underlying clock.
    pub fn pause(&mut self) {
        self.timer.pause();
    }

    /// Resumes the underlying clock.
    pub fn resume(&mut self) {
        self.timer.resume();
    }

    /// Seconds left, rounded up so the display only reads `00:00` once expired.
    pub fn remaining_secs(&self) -> u64 {
        let remaining = self.limit.saturating_sub(self.timer.elapsed);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// Whole seconds spent.
    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs().min(self.limit.as_secs())
    }

    /// True once no time remains.
    pub fn is_expired(&self) -> bool {
        self.timer.elapsed >= self.limit
    }

    /// Feedback level for the current remaining time.
    #[instrument(skip(self))]
    pub fn feedback(&self) -> TimerFeedback {
        match self.remaining_secs() {
            0 => TimerFeedback::Expired,
            s if s <= CRITICAL_SECS => TimerFeedback::Critical,
            s if s <= WARNING_SECS => TimerFeedback::Warning,
            _ => TimerFeedback::Normal,
        }
    }
}

/// Formats seconds as `MM:SS`. Minutes are not wrapped into hours.
#[instrument]
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_samples() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(45), "00:45");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(754), "12:34");
        assert_eq!(format_time(3661), "61:01");
    }

    #[test]
    fn paused_timer_ignores_ticks() {
        let mut timer = GameTimer::new();
        timer.tick(Duration::from_secs(3));
        timer.pause();
        timer.tick(Duration::from_secs(10));
        assert_eq!(timer.elapsed_secs(), 3);
        timer.resume();
        timer.tick(Duration::from_millis(1500));
        assert_eq!(timer.elapsed_secs(), 4);
    }

    #[test]
    fn countdown_feedback_levels() {
        let mut countdown = Countdown::new(60);
        assert_eq!(countdown.feedback(), TimerFeedback::Normal);

        countdown.tick(Duration::from_secs(30));
        assert_eq!(countdown.remaining_secs(), 30);
        assert_eq!(countdown.feedback(), TimerFeedback::Warning);

        countdown.tick(Duration::from_secs(20));
        assert_eq!(countdown.feedback(), TimerFeedback::Critical);

        countdown.tick(Duration::from_secs(10));
        assert_eq!(countdown.feedback(), TimerFeedback::Expired);
        assert!(countdown.is_expired());
    }

    #[test]
    fn partial_second_rounds_up() {
        let mut countdown = Countdown::new(10);
        countdown.tick(Duration::from_millis(9_500));
        assert_eq!(countdown.remaining_secs(), 1);
        assert!(!countdown.is_expired());
    }

    #[test]
    fn elapsed_is_capped_at_limit() {
        let mut countdown = Countdown::resumed(60, 50);
        countdown.tick(Duration::from_secs(30));
        assert_eq!(countdown.elapsed_secs(), 60);
        assert_eq!(countdown.remaining_secs(), 0);
    }
}
