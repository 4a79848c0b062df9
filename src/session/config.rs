//! Room configuration: time control and the host's starting color.

use chrono::Duration;
use rand::Rng;
use tracing::warn;

use crate::game_state::chess_types::Color;

pub const TIMER_MINUTES_VAR: &str = "TANDEM_TIMER_MINUTES";
pub const INCREMENT_SECONDS_VAR: &str = "TANDEM_INCREMENT_SECONDS";
pub const HOST_COLOR_VAR: &str = "TANDEM_HOST_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Initial time per player; `None` is an untimed game.
    pub timer: Option<Duration>,
    /// Added to the mover's clock after each completed move in a timed game.
    pub increment: Duration,
    /// Color of the player who creates the room; `None` picks one at random.
    pub host_color: Option<Color>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timer: None,
            increment: Duration::zero(),
            host_color: None,
        }
    }
}

impl SessionConfig {
    pub fn with_timer_minutes(mut self, minutes: i64) -> Self {
        self.timer = (minutes > 0).then(|| Duration::minutes(minutes));
        self
    }

    pub fn with_increment_seconds(mut self, seconds: i64) -> Self {
        self.increment = Duration::seconds(seconds.max(0));
        self
    }

    pub fn with_host_color(mut self, color: Color) -> Self {
        self.host_color = Some(color);
        self
    }

    /// Quick match: five-minute games, no increment.
    pub fn quick_match() -> Self {
        Self::default().with_timer_minutes(5)
    }

    /// Read the `TANDEM_*` variables. Missing or unparsable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMER_MINUTES_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(minutes) => config = config.with_timer_minutes(minutes),
                Err(_) => warn!(var = TIMER_MINUTES_VAR, value = %raw, "ignoring unparsable timer"),
            }
        }

        if let Some(raw) = lookup(INCREMENT_SECONDS_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(seconds) => config = config.with_increment_seconds(seconds),
                Err(_) => {
                    warn!(var = INCREMENT_SECONDS_VAR, value = %raw, "ignoring unparsable increment")
                }
            }
        }

        if let Some(raw) = lookup(HOST_COLOR_VAR) {
            match parse_color(&raw) {
                Some(color) => config.host_color = Some(color),
                None if raw.trim().eq_ignore_ascii_case("random") => {}
                None => warn!(var = HOST_COLOR_VAR, value = %raw, "ignoring unknown color"),
            }
        }

        config
    }

    #[inline]
    pub fn is_timed(&self) -> bool {
        self.timer.is_some()
    }

    /// The host's color, drawing one at random when none is configured.
    pub fn resolve_host_color(&self, rng: &mut impl Rng) -> Color {
        self.host_color.unwrap_or_else(|| {
            if rng.random_bool(0.5) {
                Color::White
            } else {
                Color::Black
            }
        })
    }
}

fn parse_color(raw: &str) -> Option<Color> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "white" | "w" => Some(Color::White),
        "black" | "b" => Some(Color::Black),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_is_untimed_with_random_host() {
        let config = SessionConfig::default();
        assert!(!config.is_timed());
        assert_eq!(config.increment, Duration::zero());
        assert_eq!(config.host_color, None);
    }

    #[test]
    fn reads_all_variables() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (TIMER_MINUTES_VAR, "10"),
            (INCREMENT_SECONDS_VAR, " 5 "),
            (HOST_COLOR_VAR, "Black"),
        ]));
        assert_eq!(config.timer, Some(Duration::minutes(10)));
        assert_eq!(config.increment, Duration::seconds(5));
        assert_eq!(config.host_color, Some(Color::Black));
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (TIMER_MINUTES_VAR, "soon"),
            (INCREMENT_SECONDS_VAR, "-3"),
            (HOST_COLOR_VAR, "purple"),
        ]));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn configured_host_color_wins_over_rng() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SessionConfig::default().with_host_color(Color::White);
        for _ in 0..8 {
            assert_eq!(config.resolve_host_color(&mut rng), Color::White);
        }
    }
}
