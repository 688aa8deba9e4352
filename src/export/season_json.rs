use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::LeagueConfig;
use crate::domain::{
    ChipStackEntry, SeasonReport, SeasonStanding, SurvivalSummary, TournamentExclusion,
    TournamentId,
};

/// The one document the frontend consumes: per-tournament summaries plus
/// every season-level table, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonDocument {
    pub season_id: String,
    pub season_name: String,
    pub last_updated: String,
    pub latest_source_file: String,
    pub events: Vec<TournamentEntry>,
    pub season_totals: Vec<SeasonStanding>,
    pub chip_and_chair: Vec<ChipStackEntry>,
    pub survival: Vec<SurvivalSummary>,
    pub analytics: Analytics,
    pub excluded: Vec<TournamentExclusion>,
    pub dropped_rows: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TournamentEntry {
    pub source_file: String,
    pub date: NaiveDate,
    pub total_players: u32,
    pub players: Vec<String>,
    pub results: Vec<ResultLine>,
    pub eliminations: Vec<EliminationLine>,
    pub payouts: Vec<PayoutLine>,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultLine {
    pub place: u32,
    pub player: String,
    pub points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EliminationLine {
    pub order: u32,
    pub player: String,
    pub eliminated_by: Option<String>,
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayoutLine {
    pub place: u32,
    pub player: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub most_points: Option<String>,
    pub events_played: u32,
    pub average_field_size: f64,
}

/// Assembles the export document from a finished report. Pure reshaping;
/// every number in here was derived by the pipeline.
pub fn build_document(
    report: &SeasonReport,
    config: &LeagueConfig,
    latest_source_file: &str,
    built_at: &str,
) -> SeasonDocument {
    let points_by_cell: HashMap<(&TournamentId, &str), f64> = report
        .weekly_scores
        .iter()
        .map(|s| ((&s.tournament, s.player.as_str()), s.points))
        .collect();
    let payout_by_cell: HashMap<(&TournamentId, &str), i64> = report
        .weekly_scores
        .iter()
        .map(|s| ((&s.tournament, s.player.as_str()), s.payout))
        .collect();
    let scored: HashSet<&TournamentId> = report.finishes.iter().map(|f| &f.tournament).collect();

    let events = report
        .tournaments
        .iter()
        .map(|tournament| {
            let finishes: Vec<_> = report
                .finishes
                .iter()
                .filter(|f| f.tournament == tournament.id)
                .collect();

            let results = finishes
                .iter()
                .map(|f| ResultLine {
                    place: f.place,
                    player: f.player.clone(),
                    points: points_by_cell
                        .get(&(&tournament.id, f.player.as_str()))
                        .copied()
                        .unwrap_or(0.0),
                })
                .collect();

            let eliminations = report
                .eliminations
                .iter()
                .filter(|e| e.tournament == tournament.id)
                .map(|e| EliminationLine {
                    order: e.order,
                    player: e.victim.clone(),
                    eliminated_by: e.eliminator.clone(),
                    time: e.time_text.clone(),
                })
                .collect();

            let payouts = finishes
                .iter()
                .filter_map(|f| {
                    let amount = payout_by_cell
                        .get(&(&tournament.id, f.player.as_str()))
                        .copied()
                        .unwrap_or(0);
                    (amount > 0).then(|| PayoutLine {
                        place: f.place,
                        player: f.player.clone(),
                        amount,
                    })
                })
                .collect();

            let winner = finishes
                .iter()
                .find(|f| f.place == 1)
                .map(|f| f.player.clone());

            TournamentEntry {
                source_file: tournament.source_file.clone(),
                date: tournament.id.date,
                total_players: tournament.field_size(),
                players: tournament.participants.clone(),
                results,
                eliminations,
                payouts,
                winner,
            }
        })
        .collect();

    let analytics = Analytics {
        most_points: report.standings.first().map(|s| s.player.clone()),
        events_played: scored.len() as u32,
        average_field_size: average_field_size(report),
    };

    SeasonDocument {
        season_id: config.season_id.clone(),
        season_name: config.season_name.clone(),
        last_updated: built_at.to_string(),
        latest_source_file: latest_source_file.to_string(),
        events,
        season_totals: report.standings.clone(),
        chip_and_chair: report.chip_stacks.clone(),
        survival: report.survival_summary.clone(),
        analytics,
        excluded: report.exclusions.clone(),
        dropped_rows: report.dropped_rows,
    }
}

fn average_field_size(report: &SeasonReport) -> f64 {
    if report.tournaments.is_empty() {
        return 0.0;
    }
    let total: u32 = report.tournaments.iter().map(|t| t.field_size()).sum();
    total as f64 / report.tournaments.len() as f64
}
