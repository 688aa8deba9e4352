pub mod settings;

pub use settings::{ChipStackSettings, LeagueConfig, ScoringSettings};
