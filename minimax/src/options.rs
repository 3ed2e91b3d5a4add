use anyhow::{bail, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

use super::Difficulty;

pub const DEFAULT_OSCILLATION_PENALTY: f32 = 6.0;
pub const DEFAULT_OSCILLATION_MEMORY: usize = 1;
pub const MAX_OSCILLATION_MEMORY: usize = 2;
pub const DEFAULT_OTHER_WALL_SAMPLE: usize = 24;
pub const DEFAULT_SECOND_PLY_INTELLIGENT: usize = 10;
pub const DEFAULT_SECOND_PLY_OTHER: usize = 2;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BotOptions {
    pub difficulty: Difficulty,
    /// Overrides the depth implied by `difficulty`.
    pub search_depth: Option<usize>,
    pub oscillation_penalty: f32,
    /// How many of the bot's previous cells count as recently left.
    pub oscillation_memory: usize,
    /// Non-intelligent candidates kept at the root on the impossible tier.
    pub other_wall_sample: usize,
    pub second_ply_intelligent: usize,
    pub second_ply_other: usize,
}

impl BotOptions {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn depth(&self) -> usize {
        self.search_depth
            .unwrap_or_else(|| self.difficulty.search_depth())
    }
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            search_depth: None,
            oscillation_penalty: DEFAULT_OSCILLATION_PENALTY,
            oscillation_memory: DEFAULT_OSCILLATION_MEMORY,
            other_wall_sample: DEFAULT_OTHER_WALL_SAMPLE,
            second_ply_intelligent: DEFAULT_SECOND_PLY_INTELLIGENT,
            second_ply_other: DEFAULT_SECOND_PLY_OTHER,
        }
    }
}

impl Config for BotOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let difficulty = config
            .get("difficulty")
            .and_then(|v| v.as_string())
            .map(|v| v.parse::<Difficulty>())
            .transpose()?
            .unwrap_or_default();

        let search_depth = config.get("search_depth").and_then(|v| v.as_usize());
        if search_depth == Some(0) {
            bail!("search_depth must be at least 1");
        }

        let oscillation_memory = config
            .get("oscillation_memory")
            .and_then(|v| v.as_usize())
            .unwrap_or(DEFAULT_OSCILLATION_MEMORY);
        if !(1..=MAX_OSCILLATION_MEMORY).contains(&oscillation_memory) {
            bail!(
                "oscillation_memory must be within 1..={} but was {}",
                MAX_OSCILLATION_MEMORY,
                oscillation_memory
            );
        }

        Ok(Self {
            difficulty,
            search_depth,
            oscillation_penalty: config
                .get("oscillation_penalty")
                .and_then(|v| v.as_f32())
                .unwrap_or(DEFAULT_OSCILLATION_PENALTY),
            oscillation_memory,
            other_wall_sample: config
                .get("other_wall_sample")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_OTHER_WALL_SAMPLE),
            second_ply_intelligent: config
                .get("second_ply_intelligent")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_SECOND_PLY_INTELLIGENT),
            second_ply_other: config
                .get("second_ply_other")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_SECOND_PLY_OTHER),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_defaults_when_missing() {
        let config = ConfigLoader::empty("bot".to_string()).unwrap();
        let options = config.load::<BotOptions>().unwrap();

        assert_eq!(options, BotOptions::default());
        assert_eq!(options.depth(), 7);
    }

    #[test]
    fn test_load_scoped_values() {
        let config = ConfigLoader::from_hocon_str(
            r#"
            bot {
                difficulty = "easy"
                oscillation_penalty = 4.5
                oscillation_memory = 2
                search_depth = 3
            }
            "#,
            "bot".to_string(),
        )
        .unwrap();
        let options = config.load::<BotOptions>().unwrap();

        assert_eq!(options.difficulty, Difficulty::Easy);
        assert_eq!(options.depth(), 3);
        assert_eq!(options.oscillation_memory, 2);
        assert_approx_eq!(options.oscillation_penalty, 4.5);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let memory = ConfigLoader::from_hocon_str("bot { oscillation_memory = 3 }", "bot".to_string())
            .unwrap();
        let depth =
            ConfigLoader::from_hocon_str("bot { search_depth = 0 }", "bot".to_string()).unwrap();
        let difficulty =
            ConfigLoader::from_hocon_str("bot { difficulty = \"brutal\" }", "bot".to_string())
                .unwrap();

        assert!(memory.load::<BotOptions>().is_err());
        assert!(depth.load::<BotOptions>().is_err());
        assert!(difficulty.load::<BotOptions>().is_err());
    }
}
