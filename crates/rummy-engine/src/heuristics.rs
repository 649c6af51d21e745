//! Tunable weights for the opening evaluation.

use crate::error::EngineError;
use crate::{melds, opponent_model};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The shipped defaults, kept in sync with [`Heuristics::default`].
pub const DEFAULT_HEURISTICS_YAML: &str = include_str!("heuristics.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    pub pure_sequence_weight: f64,
    pub potential_sequence_weight: f64,
    pub set_weight: f64,
    pub joker_potential_bonus: f64,
    pub play_threshold: f64,
    pub wanted_rank_picks: u32,
    pub wanted_suit_picks: u32,
    pub preference_margin: usize,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            pure_sequence_weight: 0.4,
            potential_sequence_weight: 0.3,
            set_weight: 0.3,
            joker_potential_bonus: melds::JOKER_POTENTIAL_BONUS,
            play_threshold: 0.5,
            wanted_rank_picks: opponent_model::WANTED_RANK_PICKS,
            wanted_suit_picks: opponent_model::WANTED_SUIT_PICKS,
            preference_margin: opponent_model::PREFERENCE_MARGIN,
        }
    }
}

impl Heuristics {
    /// Parses a YAML document; keys it leaves out keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, EngineError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }
}
