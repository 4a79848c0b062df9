//! Per-color game clock.
//!
//! Only the side to move has a running clock. Callers pass the current time
//! in, so the clock itself never reads the wall clock.

use chrono::{DateTime, Duration, Utc};

use crate::game_state::chess_types::Color;
use crate::session::config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    white: Option<Duration>,
    black: Option<Duration>,
    increment: Duration,
    running: Option<(Color, DateTime<Utc>)>,
}

impl GameClock {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            white: config.timer,
            black: config.timer,
            increment: config.increment,
            running: None,
        }
    }

    #[inline]
    pub fn is_timed(&self) -> bool {
        self.white.is_some()
    }

    pub fn running_color(&self) -> Option<Color> {
        self.running.map(|(color, _)| color)
    }

    /// Time left for `color` at `now`; `None` in an untimed game.
    pub fn remaining(&self, color: Color, now: DateTime<Utc>) -> Option<Duration> {
        let stored = self.stored(color)?;
        let elapsed = match self.running {
            Some((running, since)) if running == color => now - since,
            _ => Duration::zero(),
        };
        Some((stored - elapsed).max(Duration::zero()))
    }

    pub fn is_flagged(&self, color: Color, now: DateTime<Utc>) -> bool {
        self.remaining(color, now)
            .is_some_and(|left| left <= Duration::zero())
    }

    /// Charge the running side and start `color`'s clock at `now`.
    pub fn switch_to(&mut self, color: Color, now: DateTime<Utc>) {
        self.charge(now);
        self.running = Some((color, now));
    }

    /// End of a completed move: charge the mover, add the increment, and start
    /// the opponent's clock.
    pub fn press(&mut self, now: DateTime<Utc>) {
        let Some(mover) = self.running_color() else {
            return;
        };
        self.charge(now);
        let increment = self.increment;
        if let Some(left) = self.stored_mut(mover) {
            *left = *left + increment;
        }
        self.running = Some((mover.opposite(), now));
    }

    /// Charge the running side and stop.
    pub fn stop(&mut self, now: DateTime<Utc>) {
        self.charge(now);
        self.running = None;
    }

    fn charge(&mut self, now: DateTime<Utc>) {
        let Some((color, since)) = self.running else {
            return;
        };
        if let Some(left) = self.stored_mut(color) {
            *left = (*left - (now - since)).max(Duration::zero());
        }
        self.running = Some((color, now));
    }

    fn stored(&self, color: Color) -> Option<Duration> {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn stored_mut(&mut self, color: Color) -> Option<&mut Duration> {
        match color {
            Color::White => self.white.as_mut(),
            Color::Black => self.black.as_mut(),
        }
    }
}
