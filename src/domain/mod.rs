pub mod models;

pub use models::{
    ChipStackEntry, Elimination, Event, EventKind, ExclusionReason, FinishRecord, RawRow,
    SeasonReport, SeasonStanding, SurvivalRecord, SurvivalSummary, Tournament, TournamentExclusion,
    TournamentId, TournamentLog, WeeklyScore,
};
