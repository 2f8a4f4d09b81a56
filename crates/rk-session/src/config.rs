//! Configuration for a dice session.

use serde::Deserialize;

/// Timing and randomness settings for a [`DiceSession`](crate::DiceSession).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quiet period before roll history is written back, in milliseconds.
    pub history_quiet_ms: u64,
    /// Quiet period before presets are written back, in milliseconds.
    pub presets_quiet_ms: u64,
    /// Delay before rolled results join the history, in milliseconds.
    pub roll_delay_ms: u64,
    /// RNG seed for reproducible rolls. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_quiet_ms: 5_000,
            presets_quiet_ms: 1_000,
            roll_delay_ms: 500,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the roll reveal delay. Zero reveals results immediately.
    pub fn with_roll_delay(mut self, ms: u64) -> Self {
        self.roll_delay_ms = ms;
        self
    }

    /// Set the history quiet period.
    pub fn with_history_quiet(mut self, ms: u64) -> Self {
        self.history_quiet_ms = ms;
        self
    }

    /// Set the presets quiet period.
    pub fn with_presets_quiet(mut self, ms: u64) -> Self {
        self.presets_quiet_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.history_quiet_ms, 5_000);
        assert_eq!(cfg.presets_quiet_ms, 1_000);
        assert_eq!(cfg.roll_delay_ms, 500);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_seed(7)
            .with_roll_delay(0)
            .with_history_quiet(250)
            .with_presets_quiet(100);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.roll_delay_ms, 0);
        assert_eq!(cfg.history_quiet_ms, 250);
        assert_eq!(cfg.presets_quiet_ms, 100);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: SessionConfig = serde_json::from_str(r#"{ "roll_delay_ms": 0 }"#).unwrap();
        assert_eq!(cfg.roll_delay_ms, 0);
        assert_eq!(cfg.history_quiet_ms, 5_000);
        assert_eq!(cfg.seed, None);
    }
}
