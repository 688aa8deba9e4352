use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identity of one weekly tournament: the season it belongs to plus its
/// calendar date. One tournament is played per league night.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TournamentId {
    pub season_id: String,
    pub date: NaiveDate,
}

impl TournamentId {
    pub fn new(season_id: &str, date: NaiveDate) -> Self {
        Self {
            season_id: season_id.to_string(),
            date,
        }
    }
}

impl std::fmt::Display for TournamentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.season_id, self.date)
    }
}

/// One row as it appears in a weekly tournament log, before normalization.
/// Column names mirror the log sheets ("Players" holds the event's subject).
/// Unmapped columns (Level, Chips, Amount, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Event", default)]
    pub event: String,
    #[serde(rename = "Players", default)]
    pub player: String,
    #[serde(rename = "Eliminated By", default)]
    pub eliminated_by: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Raw rows for one tournament, tagged with its identity. This is the core
/// pipeline's input boundary: where the rows come from (CSV, a database, an
/// API) is the caller's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentLog {
    pub date: NaiveDate,
    pub source_file: String,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    BuyIn,
    Eliminated,
    TournamentStart,
    TournamentEnd,
}

/// One cleaned log event. Immutable once built, scoped to a single
/// tournament. `timestamp` is best-effort: rows logged without a time keep
/// `None` and sort after timestamped rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub tournament: TournamentId,
    pub kind: EventKind,
    pub timestamp: Option<NaiveDateTime>,
    /// Time column as logged, kept for display.
    pub time_text: String,
    /// The player the event is about (trimmed, case preserved).
    pub subject: String,
    /// Credited eliminator, only meaningful for `Eliminated` events.
    pub actor: Option<String>,
    pub raw: BTreeMap<String, String>,
}

/// Derived per-tournament facts: participant set (distinct BuyIn subjects)
/// and rollover-corrected start/end markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub source_file: String,
    pub participants: Vec<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl Tournament {
    pub fn field_size(&self) -> u32 {
        self.participants.len() as u32
    }
}

/// One deduplicated elimination, in tournament order (1 = first out).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elimination {
    pub tournament: TournamentId,
    pub order: u32,
    pub victim: String,
    pub eliminator: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
    pub time_text: String,
}

/// Finish place for one player in one tournament. Places form a permutation
/// of 1..=field_size: the winner holds place 1, the first player out holds
/// place field_size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishRecord {
    pub tournament: TournamentId,
    pub player: String,
    pub place: u32,
    pub field_size: u32,
}

/// Points and payout earned by one player in one tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyScore {
    pub tournament: TournamentId,
    pub player: String,
    pub points: f64,
    pub payout: i64,
}

/// Season leaderboard line. `rank` is sequential: every player gets a
/// distinct position even on tied points (ties broken by name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStanding {
    pub player: String,
    pub rank: u32,
    pub total_points: f64,
    pub total_points_drop2: f64,
    pub weeks_played: u32,
    pub money_won: i64,
}

/// Time alive for one player in one tournament, clamped to
/// [0, tournament_minutes].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalRecord {
    pub tournament: TournamentId,
    pub player: String,
    pub minutes_survived: f64,
    pub tournament_minutes: f64,
    pub survival_percent: f64,
}

/// Season-level survival averages per player, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalSummary {
    pub player: String,
    pub weeks_played: u32,
    pub avg_minutes_survived: f64,
    pub avg_survival_percent: f64,
}

/// One line of the "chip and a chair" bonus leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipStackEntry {
    pub player: String,
    pub base_stack: i64,
    pub points_bonus: i64,
    pub elim_count: u32,
    pub elim_bonus: i64,
    pub repeat_count: u32,
    pub repeat_bonus: i64,
    pub hv_elim_count: u32,
    pub hv_elim_bonus: i64,
    pub total_stack: i64,
}

/// Why a tournament was (partly) left out of season aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Zero or more than one participant was never eliminated; finish,
    /// scoring and survival records are withheld for the tournament.
    AmbiguousWinner { uneliminated: Vec<String> },
    /// No usable start or end marker; only survival is withheld.
    MissingTournamentBoundary,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::AmbiguousWinner { uneliminated } => {
                write!(f, "ambiguous winner ({} never eliminated)", uneliminated.len())
            }
            ExclusionReason::MissingTournamentBoundary => {
                write!(f, "missing tournament start/end marker")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentExclusion {
    pub tournament: TournamentId,
    pub reason: ExclusionReason,
}

/// Everything one full rebuild derives from the raw logs. Collections are
/// deterministically ordered so rebuilding from unchanged input yields an
/// identical report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub season_id: String,
    pub tournaments: Vec<Tournament>,
    pub finishes: Vec<FinishRecord>,
    pub weekly_scores: Vec<WeeklyScore>,
    pub standings: Vec<SeasonStanding>,
    pub survival: Vec<SurvivalRecord>,
    pub survival_summary: Vec<SurvivalSummary>,
    pub chip_stacks: Vec<ChipStackEntry>,
    pub eliminations: Vec<Elimination>,
    pub exclusions: Vec<TournamentExclusion>,
    /// Rows dropped because their time field matched no accepted format.
    pub dropped_rows: u32,
}
