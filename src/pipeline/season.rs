use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::config::ScoringSettings;
use crate::domain::{SeasonStanding, WeeklyScore};

/// Sum after discarding the `drop` lowest weekly values. Absent weeks are
/// already zero-filled by the caller; with `drop` or fewer weeks elapsed
/// nothing is discarded and the drop total equals the plain total.
fn sum_after_drops(week_points: &[f64], drop: usize) -> f64 {
    if week_points.len() <= drop {
        return week_points.iter().sum();
    }
    let mut sorted = week_points.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[drop..].iter().sum()
}

/// Rolls weekly scores into the season leaderboard. The full player × week
/// grid is built first — every rostered player crossed with every week
/// played so far, zeros for skipped weeks — so the drop rule sees absences.
/// Ranks are sequential: ties are split by total points, weeks played,
/// then name, and every player gets a distinct position.
pub fn aggregate_season(
    scores: &[WeeklyScore],
    roster: &[String],
    settings: &ScoringSettings,
) -> Vec<SeasonStanding> {
    let weeks: BTreeSet<NaiveDate> = scores.iter().map(|s| s.tournament.date).collect();

    let mut points_by_cell: BTreeMap<(&str, NaiveDate), f64> = BTreeMap::new();
    let mut money_by_player: BTreeMap<&str, i64> = BTreeMap::new();
    for score in scores {
        points_by_cell.insert((score.player.as_str(), score.tournament.date), score.points);
        *money_by_player.entry(score.player.as_str()).or_insert(0) += score.payout;
    }

    let mut standings: Vec<SeasonStanding> = roster
        .iter()
        .map(|player| {
            let week_points: Vec<f64> = weeks
                .iter()
                .map(|week| {
                    points_by_cell
                        .get(&(player.as_str(), *week))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect();
            SeasonStanding {
                player: player.clone(),
                rank: 0,
                total_points: week_points.iter().sum(),
                total_points_drop2: sum_after_drops(&week_points, settings.drop_weeks),
                weeks_played: week_points.iter().filter(|p| **p > 0.0).count() as u32,
                money_won: money_by_player.get(player.as_str()).copied().unwrap_or(0),
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.total_points_drop2
            .total_cmp(&a.total_points_drop2)
            .then(b.total_points.total_cmp(&a.total_points))
            .then(b.weeks_played.cmp(&a.weeks_played))
            .then(a.player.cmp(&b.player))
    });
    for (position, standing) in standings.iter_mut().enumerate() {
        standing.rank = position as u32 + 1;
    }
    standings
}
