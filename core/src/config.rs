use crate::error::{DerbyError, DerbyResult};
use serde::{Deserialize, Serialize};

/// Total competitor pool size per session.
pub const HORSE_COUNT: usize = 20;
/// Rounds (heats) per session.
pub const NUMBER_OF_ROUNDS: usize = 6;
/// Lanes, i.e. competitors, per round.
pub const RACER_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConfig {
    #[serde(default = "default_pool_size")]
    pub pool_size:       usize,
    #[serde(default = "default_rounds")]
    pub rounds:          usize,
    #[serde(default = "default_lanes")]
    pub lanes_per_round: usize,
    /// Session seed. `None` draws a fresh seed per session.
    #[serde(default)]
    pub seed:            Option<u64>,
}

fn default_pool_size() -> usize { HORSE_COUNT }
fn default_rounds() -> usize { NUMBER_OF_ROUNDS }
fn default_lanes() -> usize { RACER_COUNT }

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            pool_size:       HORSE_COUNT,
            rounds:          NUMBER_OF_ROUNDS,
            lanes_per_round: RACER_COUNT,
            seed:            None,
        }
    }
}

impl RaceConfig {
    /// Load from a JSON file. Missing fields fall back to the build-time
    /// constants.
    pub fn load(path: &str) -> DerbyResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(content: &str) -> DerbyResult<Self> {
        let config: RaceConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with a fixed seed for use in tests.
    pub fn default_test(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn validate(&self) -> DerbyResult<()> {
        if self.rounds == 0 {
            return Err(DerbyError::Configuration("rounds must be at least 1".into()));
        }
        if self.lanes_per_round == 0 {
            return Err(DerbyError::Configuration("lanes_per_round must be at least 1".into()));
        }
        if self.pool_size < self.lanes_per_round {
            return Err(DerbyError::Configuration(format!(
                "pool of {} competitors is smaller than {} lanes per round",
                self.pool_size, self.lanes_per_round
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RaceConfig::default();
        assert_eq!(config.pool_size, 20);
        assert_eq!(config.rounds, 6);
        assert_eq!(config.lanes_per_round, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_constants() {
        let config: RaceConfig = serde_json::from_str(r#"{ "rounds": 3, "seed": 42 }"#).unwrap();
        assert_eq!(config.rounds, 3);
        assert_eq!(config.pool_size, HORSE_COUNT);
        assert_eq!(config.lanes_per_round, RACER_COUNT);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let result = RaceConfig::from_json(r#"{ "rounds": "six" }"#);
        assert!(matches!(result, Err(DerbyError::Serialization(_))), "got {result:?}");
    }

    #[test]
    fn parsed_config_is_validated() {
        let result = RaceConfig::from_json(r#"{ "pool_size": 4, "lanes_per_round": 8 }"#);
        assert!(matches!(result, Err(DerbyError::Configuration(_))), "got {result:?}");
    }

    #[test]
    fn missing_file_is_reported() {
        let result = RaceConfig::load("/nonexistent/derby/race.json");
        assert!(matches!(result, Err(DerbyError::Other(_))), "got {result:?}");
    }

    #[test]
    fn small_pool_is_a_configuration_error() {
        let config = RaceConfig { pool_size: 5, rounds: 1, lanes_per_round: 8, seed: None };
        assert!(matches!(config.validate(), Err(DerbyError::Configuration(_))));

        let no_rounds = RaceConfig { rounds: 0, ..RaceConfig::default() };
        assert!(matches!(no_rounds.validate(), Err(DerbyError::Configuration(_))));
    }
}
