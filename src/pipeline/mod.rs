pub mod chip_stack;
pub mod normalize;
pub mod scoring;
pub mod season;
pub mod sequencer;
pub mod survival;

use anyhow::Result;
use log::{info, warn};

use crate::config::LeagueConfig;
use crate::domain::{
    ExclusionReason, SeasonReport, Tournament, TournamentExclusion, TournamentLog,
};
use crate::errors::PipelineError;
use normalize::Normalizer;

/// Rebuilds every derived collection from the raw logs. Pure batch: the
/// same input always yields the same report, and per-tournament anomalies
/// surface as exclusions instead of aborting the season.
pub fn run(logs: &[TournamentLog], config: &LeagueConfig) -> Result<SeasonReport> {
    config.validate()?;
    if logs.iter().all(|log| log.rows.is_empty()) {
        return Err(PipelineError::EmptyInput.into());
    }

    let normalizer = Normalizer::new()?;

    let mut sorted_logs: Vec<&TournamentLog> = logs.iter().collect();
    sorted_logs.sort_by(|a, b| a.date.cmp(&b.date).then(a.source_file.cmp(&b.source_file)));

    let mut tournaments = Vec::new();
    let mut finishes = Vec::new();
    let mut weekly_scores = Vec::new();
    let mut survival = Vec::new();
    let mut eliminations = Vec::new();
    let mut exclusions = Vec::new();
    let mut roster: Vec<String> = Vec::new();
    let mut dropped_rows = 0u32;

    for log in sorted_logs {
        let normalized = normalizer.normalize(log, &config.season_id);
        dropped_rows += normalized.dropped_rows;

        let (start, end) = normalize::tournament_bounds(&normalized.events);
        let tournament = Tournament {
            id: normalized.id,
            source_file: log.source_file.clone(),
            participants: normalize::participants(&normalized.events),
            start,
            end,
        };

        let elims = sequencer::dedupe_eliminations(&tournament.id, &normalized.events);

        match sequencer::assign_places(&tournament.id, &tournament.participants, &elims) {
            Ok(places) => {
                weekly_scores.extend(scoring::score_tournament(&places, &config.scoring));
                match survival::survival_for_tournament(&tournament, &elims) {
                    Some(records) => survival.extend(records),
                    None => {
                        warn!("{}: no start/end marker, survival skipped", tournament.id);
                        exclusions.push(TournamentExclusion {
                            tournament: tournament.id.clone(),
                            reason: ExclusionReason::MissingTournamentBoundary,
                        });
                    }
                }
                finishes.extend(places);
            }
            Err(ambiguous) => {
                warn!(
                    "{}: {} players never eliminated, tournament excluded from scoring",
                    tournament.id,
                    ambiguous.uneliminated.len()
                );
                exclusions.push(TournamentExclusion {
                    tournament: tournament.id.clone(),
                    reason: ExclusionReason::AmbiguousWinner {
                        uneliminated: ambiguous.uneliminated,
                    },
                });
            }
        }

        roster.extend(tournament.participants.iter().cloned());
        eliminations.extend(elims);
        tournaments.push(tournament);
    }

    roster.sort();
    roster.dedup();

    let standings = season::aggregate_season(&weekly_scores, &roster, &config.scoring);
    let survival_summary = survival::summarize_survival(&survival);
    let chip_stacks = chip_stack::build_chip_stacks(&standings, &eliminations, &config.chip_stack);

    info!(
        "  → {} tournaments, {} players, {} finish records",
        tournaments.len(),
        roster.len(),
        finishes.len()
    );

    Ok(SeasonReport {
        season_id: config.season_id.clone(),
        tournaments,
        finishes,
        weekly_scores,
        standings,
        survival,
        survival_summary,
        chip_stacks,
        eliminations,
        exclusions,
        dropped_rows,
    })
}
