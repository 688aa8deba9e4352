use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

/// Weekly scoring and payout rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Buy-in per player, in whole currency units.
    pub buy_in: i64,
    /// Pot proportions for places 1-3. Must hold exactly 3 entries summing
    /// to 1.0.
    pub payout_split: Vec<f64>,
    /// Payouts are kept to multiples of this increment.
    pub payout_increment: i64,
    /// Points awarded per position beaten (winner scores
    /// `points_per_place * field_size`).
    pub points_per_place: f64,
    /// How many lowest weekly scores are discarded from season totals.
    pub drop_weeks: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            buy_in: 20,
            payout_split: vec![0.45, 0.35, 0.2],
            payout_increment: 20,
            points_per_place: 0.5,
            drop_weeks: 2,
        }
    }
}

/// "Chip and a chair" bonus leaderboard rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipStackSettings {
    pub base_stack: i64,
    /// Chips per season point (drop-2 totals).
    pub season_points_multiplier: i64,
    /// Chips per elimination credited to a player.
    pub chip_per_elimination: i64,
    /// Capped bonus per (eliminator, victim) pair, indexed by occurrence
    /// count: 1x, 2x, 3x-or-more. Flat per tier, not additive.
    pub repeat_pair_tiers: [i64; 3],
    /// Chips for knocking out a top player while ranked outside the top.
    pub chip_per_high_value_elim: i64,
    /// Victim dense rank must be at most this to count as high-value.
    pub hv_victim_rank_max: u32,
    /// Eliminator dense rank must be at least this to collect the bonus.
    pub hv_eliminator_rank_min: u32,
}

impl Default for ChipStackSettings {
    fn default() -> Self {
        Self {
            base_stack: 6500,
            season_points_multiplier: 150,
            chip_per_elimination: 50,
            repeat_pair_tiers: [50, 100, 250],
            chip_per_high_value_elim: 250,
            hv_victim_rank_max: 3,
            hv_eliminator_rank_min: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub season_id: String,
    pub season_name: String,
    pub scoring: ScoringSettings,
    pub chip_stack: ChipStackSettings,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueConfig {
    pub fn new() -> Self {
        Self {
            season_id: "spring_2026".to_string(),
            season_name: "Spring Season 2026".to_string(),
            scoring: ScoringSettings::default(),
            chip_stack: ChipStackSettings::default(),
        }
    }

    /// Rejects rule sets the pipeline cannot honor. Called before any
    /// computation starts.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let split = &self.scoring.payout_split;
        if split.len() != 3 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "payout split must have exactly 3 entries, got {}",
                split.len()
            )));
        }
        let sum: f64 = split.iter().sum();
        if (sum - 1.0).abs() > 1e-4 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "payout split must sum to 1.0, got {sum}"
            )));
        }
        if self.scoring.payout_increment <= 0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "payout increment must be positive, got {}",
                self.scoring.payout_increment
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LeagueConfig::new().validate().is_ok());
    }

    #[test]
    fn rejects_wrong_split_length() {
        let mut config = LeagueConfig::new();
        config.scoring.payout_split = vec![0.6, 0.4];
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_split_not_summing_to_one() {
        let mut config = LeagueConfig::new();
        config.scoring.payout_split = vec![0.5, 0.3, 0.1];
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfiguration(_))
        ));
    }
}
