use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDateTime;
use log::warn;

use crate::domain::{Elimination, SurvivalRecord, SurvivalSummary, Tournament, TournamentId};

fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    ((to - from).num_seconds() as f64 / 60.0).max(0.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Minutes alive per participant. Eliminated players run from the start
/// marker to their bust, clamped to [0, tournament_minutes]; the survivor
/// gets the full duration. Returns `None` when the tournament is missing
/// a usable start or end marker.
pub fn survival_for_tournament(
    tournament: &Tournament,
    eliminations: &[Elimination],
) -> Option<Vec<SurvivalRecord>> {
    let start = tournament.start?;
    let end = tournament.end?;
    let tournament_minutes = minutes_between(start, end);

    let mut first_bust: HashMap<&str, NaiveDateTime> = HashMap::new();
    let mut busted: HashSet<&str> = HashSet::new();
    for elim in eliminations {
        busted.insert(elim.victim.as_str());
        if let Some(timestamp) = elim.timestamp {
            first_bust.entry(elim.victim.as_str()).or_insert(timestamp);
        }
    }

    let mut records = Vec::with_capacity(tournament.participants.len());
    for player in &tournament.participants {
        let minutes_survived = if let Some(bust) = first_bust.get(player.as_str()) {
            minutes_between(start, *bust).min(tournament_minutes)
        } else if busted.contains(player.as_str()) {
            // busted at an unknown time, nothing to measure
            warn!(
                "{}: no bust time for {:?}, survival skipped",
                tournament.id, player
            );
            continue;
        } else {
            tournament_minutes
        };

        let survival_percent = if tournament_minutes > 0.0 {
            minutes_survived / tournament_minutes
        } else {
            0.0
        };
        records.push(SurvivalRecord {
            tournament: tournament.id.clone(),
            player: player.clone(),
            minutes_survived,
            tournament_minutes,
            survival_percent,
        });
    }
    Some(records)
}

/// Season averages per player across their tournaments, rounded to one
/// decimal (minutes) and three decimals (percent) for display. Ordered by
/// average minutes survived, then name.
pub fn summarize_survival(records: &[SurvivalRecord]) -> Vec<SurvivalSummary> {
    let mut per_player: BTreeMap<&str, Vec<&SurvivalRecord>> = BTreeMap::new();
    for record in records {
        per_player.entry(record.player.as_str()).or_default().push(record);
    }

    let mut summaries: Vec<SurvivalSummary> = per_player
        .into_iter()
        .map(|(player, rows)| {
            let weeks: HashSet<&TournamentId> = rows.iter().map(|r| &r.tournament).collect();
            let count = rows.len() as f64;
            let minutes: f64 = rows.iter().map(|r| r.minutes_survived).sum();
            let percent: f64 = rows.iter().map(|r| r.survival_percent).sum();
            SurvivalSummary {
                player: player.to_string(),
                weeks_played: weeks.len() as u32,
                avg_minutes_survived: round1(minutes / count),
                avg_survival_percent: round3(percent / count),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.avg_minutes_survived
            .total_cmp(&a.avg_minutes_survived)
            .then(a.player.cmp(&b.player))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn id() -> TournamentId {
        TournamentId::new("spring_2026", NaiveDate::from_ymd_opt(2026, 2, 10).unwrap())
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn tournament(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Tournament {
        Tournament {
            id: id(),
            source_file: "02.10.26 log.csv".to_string(),
            participants: vec!["Alice".to_string(), "Bob".to_string()],
            start,
            end,
        }
    }

    fn elimination(victim: &str, timestamp: Option<NaiveDateTime>) -> Elimination {
        Elimination {
            tournament: id(),
            order: 1,
            victim: victim.to_string(),
            eliminator: None,
            timestamp,
            time_text: String::new(),
        }
    }

    #[test]
    fn winner_survives_the_full_duration() {
        let t = tournament(Some(at(10, 19, 0)), Some(at(10, 22, 0)));
        let elims = vec![elimination("Bob", Some(at(10, 20, 30)))];
        let records = survival_for_tournament(&t, &elims).unwrap();

        let alice = records.iter().find(|r| r.player == "Alice").unwrap();
        let bob = records.iter().find(|r| r.player == "Bob").unwrap();
        assert_eq!(alice.minutes_survived, 180.0);
        assert_eq!(alice.survival_percent, 1.0);
        assert_eq!(bob.minutes_survived, 90.0);
        assert_eq!(bob.survival_percent, 0.5);
    }

    #[test]
    fn missing_boundary_yields_nothing() {
        let t = tournament(Some(at(10, 19, 0)), None);
        assert!(survival_for_tournament(&t, &[]).is_none());
    }

    #[test]
    fn midnight_rollover_duration_is_positive() {
        // bounds come in already rollover-corrected: 23:50 -> next-day 00:20
        let t = tournament(Some(at(10, 23, 50)), Some(at(11, 0, 20)));
        let records = survival_for_tournament(&t, &[]).unwrap_or_default();
        assert_eq!(records[0].tournament_minutes, 30.0);
    }

    #[test]
    fn bust_times_outside_the_window_are_clamped() {
        let t = tournament(Some(at(10, 19, 0)), Some(at(10, 21, 0)));
        let elims = vec![elimination("Bob", Some(at(10, 22, 30)))];
        let records = survival_for_tournament(&t, &elims).unwrap();

        let bob = records.iter().find(|r| r.player == "Bob").unwrap();
        assert_eq!(bob.minutes_survived, 120.0);

        let early = vec![elimination("Bob", Some(at(10, 18, 0)))];
        let records = survival_for_tournament(&t, &early).unwrap();
        let bob = records.iter().find(|r| r.player == "Bob").unwrap();
        assert_eq!(bob.minutes_survived, 0.0);
    }

    #[test]
    fn zero_length_tournament_has_zero_percent() {
        let t = tournament(Some(at(10, 19, 0)), Some(at(10, 19, 0)));
        let records = survival_for_tournament(&t, &[]).unwrap();
        assert_eq!(records[0].survival_percent, 0.0);
    }

    #[test]
    fn summary_averages_and_rounds() {
        let records = vec![
            SurvivalRecord {
                tournament: id(),
                player: "Alice".to_string(),
                minutes_survived: 100.0,
                tournament_minutes: 120.0,
                survival_percent: 100.0 / 120.0,
            },
            SurvivalRecord {
                tournament: TournamentId::new(
                    "spring_2026",
                    NaiveDate::from_ymd_opt(2026, 2, 17).unwrap(),
                ),
                player: "Alice".to_string(),
                minutes_survived: 45.5,
                tournament_minutes: 91.0,
                survival_percent: 0.5,
            },
        ];
        let summaries = summarize_survival(&records);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].weeks_played, 2);
        assert_eq!(summaries[0].avg_minutes_survived, 72.8);
        assert_eq!(summaries[0].avg_survival_percent, 0.667);
    }
}
