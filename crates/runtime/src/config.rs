//! Runtime configuration read from the environment.
use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Scheduler and battle-loop settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Length of one scheduling tick (a "frame").
    pub frame: Duration,

    /// Multiplier applied to timed waits. `0.0` makes every wait instant.
    pub time_scale: f64,

    /// Rounds played before a battle ends without a winner.
    pub max_rounds: u32,

    /// Ticks a single task may take before it is considered stalled.
    pub max_ticks: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(16),
            time_scale: 1.0,
            max_rounds: 50,
            max_ticks: 1_000_000,
        }
    }
}

impl RuntimeConfig {
    /// Largest accepted `time_scale`.
    pub const MAX_TIME_SCALE: f64 = 1_000.0;

    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_FRAME_MS` - Tick length in milliseconds (default: 16)
    /// - `BATTLE_TIME_SCALE` - Wait multiplier, 0 for instant, at most
    ///   [`Self::MAX_TIME_SCALE`] (default: 1.0)
    /// - `BATTLE_MAX_ROUNDS` - Round limit (default: 50)
    /// - `BATTLE_MAX_TICKS` - Stall guard per task (default: 1000000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("BATTLE_FRAME_MS") {
            config.frame = Duration::from_millis(ms);
        }
        if let Some(scale) = read_env::<f64>("BATTLE_TIME_SCALE") {
            config.time_scale = scale;
        }
        if let Some(rounds) = read_env::<u32>("BATTLE_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Some(ticks) = read_env::<u64>("BATTLE_MAX_TICKS") {
            config.max_ticks = ticks.max(1);
        }

        config.sanitized()
    }

    /// Zero-length frames and waits, for tests and fast simulation.
    pub fn instant() -> Self {
        Self {
            frame: Duration::ZERO,
            time_scale: 0.0,
            ..Self::default()
        }
    }

    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }

    /// Applies `time_scale` to an authored wait.
    ///
    /// A product too large for a `Duration` saturates at `Duration::MAX`.
    pub fn scaled(&self, wait: Duration) -> Duration {
        if self.time_scale <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(wait.as_secs_f64() * self.time_scale).unwrap_or_else(|_| {
            tracing::warn!(?wait, time_scale = self.time_scale, "scaled wait out of range");
            Duration::MAX
        })
    }

    fn sanitized(mut self) -> Self {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            tracing::warn!(time_scale = self.time_scale, "invalid time scale, using 1.0");
            self.time_scale = 1.0;
        } else if self.time_scale > Self::MAX_TIME_SCALE {
            tracing::warn!(
                time_scale = self.time_scale,
                max = Self::MAX_TIME_SCALE,
                "time scale too large, clamping"
            );
            self.time_scale = Self::MAX_TIME_SCALE;
        }
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scale_collapses_waits() {
        let config = RuntimeConfig::instant();
        assert_eq!(config.scaled(Duration::from_millis(350)), Duration::ZERO);
    }

    #[test]
    fn scale_multiplies_waits() {
        let config = RuntimeConfig {
            time_scale: 0.5,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.scaled(Duration::from_millis(300)), Duration::from_millis(150));
    }

    #[test]
    fn negative_scale_is_rejected() {
        let config = RuntimeConfig {
            time_scale: -2.0,
            ..RuntimeConfig::default()
        }
        .sanitized();
        assert_eq!(config.time_scale, 1.0);
    }

    #[test]
    fn huge_scale_is_clamped() {
        let config = RuntimeConfig {
            time_scale: 1e30,
            ..RuntimeConfig::default()
        }
        .sanitized();
        assert_eq!(config.time_scale, RuntimeConfig::MAX_TIME_SCALE);
        assert_eq!(config.scaled(Duration::from_secs(2)), Duration::from_secs(2_000));
    }

    #[test]
    fn out_of_range_wait_saturates() {
        let config = RuntimeConfig {
            time_scale: 1e30,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.scaled(Duration::from_millis(350)), Duration::MAX);
    }
}
