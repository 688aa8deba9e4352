use crate::config::ScoringSettings;
use crate::domain::{FinishRecord, WeeklyScore};

/// Half a point per position beaten, so the winner of an N-player field
/// scores `points_per_place * N` and the first player out scores
/// `points_per_place`.
pub fn points_for_place(place: u32, field_size: u32, points_per_place: f64) -> f64 {
    points_per_place * (field_size - place + 1) as f64
}

/// Splits the pot across the paid places. Each share is floored to the
/// increment, then the leftover is handed out one increment at a time
/// cycling 1st → 2nd → 3rd → 1st until less than one increment remains.
pub fn payout_split(pot: i64, proportions: &[f64], increment: i64) -> Vec<i64> {
    let mut shares: Vec<i64> = proportions
        .iter()
        .map(|p| (pot as f64 * p / increment as f64).floor() as i64 * increment)
        .collect();
    if shares.is_empty() {
        return shares;
    }

    let mut leftover = pot - shares.iter().sum::<i64>();
    let mut next = 0;
    while leftover >= increment {
        shares[next] += increment;
        leftover -= increment;
        next = (next + 1) % shares.len();
    }
    shares
}

/// Points and payouts for one tournament's finish records. With fewer
/// players than paid places, only the occupied places collect (the pot is
/// still sized off the full field).
pub fn score_tournament(finishes: &[FinishRecord], settings: &ScoringSettings) -> Vec<WeeklyScore> {
    let Some(first) = finishes.first() else {
        return Vec::new();
    };
    let pot = first.field_size as i64 * settings.buy_in;
    let payouts = payout_split(pot, &settings.payout_split, settings.payout_increment);

    finishes
        .iter()
        .map(|finish| {
            let paid = finish.place as usize;
            let payout = if paid >= 1 && paid <= payouts.len() {
                payouts[paid - 1]
            } else {
                0
            };
            WeeklyScore {
                tournament: finish.tournament.clone(),
                player: finish.player.clone(),
                points: points_for_place(finish.place, finish.field_size, settings.points_per_place),
                payout,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentId;
    use chrono::NaiveDate;

    fn id() -> TournamentId {
        TournamentId::new("spring_2026", NaiveDate::from_ymd_opt(2026, 2, 10).unwrap())
    }

    #[test]
    fn points_at_known_places() {
        assert_eq!(points_for_place(1, 10, 0.5), 5.0);
        assert_eq!(points_for_place(10, 10, 0.5), 0.5);
        assert_eq!(points_for_place(3, 8, 0.5), 3.0);
    }

    #[test]
    fn splits_evenly_divisible_pot() {
        assert_eq!(payout_split(400, &[0.45, 0.35, 0.2], 20), vec![180, 140, 80]);
    }

    #[test]
    fn leftover_redistribution_exhausts_the_pot() {
        let shares = payout_split(220, &[0.45, 0.35, 0.2], 20);
        assert_eq!(shares.iter().sum::<i64>(), 220);
        for share in &shares {
            assert_eq!(share % 20, 0);
        }
        // 99/77/44 floors to 80/60/40, the 40 left over cycles to 1st and 2nd
        assert_eq!(shares, vec![100, 80, 40]);
    }

    #[test]
    fn short_field_pays_only_occupied_places() {
        let finishes = vec![
            FinishRecord {
                tournament: id(),
                player: "Alice".to_string(),
                place: 1,
                field_size: 2,
            },
            FinishRecord {
                tournament: id(),
                player: "Bob".to_string(),
                place: 2,
                field_size: 2,
            },
        ];
        let scores = score_tournament(&finishes, &ScoringSettings::default());

        // pot 40: floors to 0/0/0, leftover cycles 20 to 1st, 20 to 2nd
        assert_eq!(scores[0].payout, 20);
        assert_eq!(scores[1].payout, 20);
        assert_eq!(scores.iter().map(|s| s.payout).sum::<i64>(), 40);
    }

    #[test]
    fn winner_takes_top_payout_and_points() {
        let finishes: Vec<FinishRecord> = (1..=10)
            .map(|place| FinishRecord {
                tournament: id(),
                player: format!("P{place}"),
                place,
                field_size: 10,
            })
            .collect();
        let scores = score_tournament(&finishes, &ScoringSettings::default());

        // pot 200 -> 80/60/40 after flooring, remainder 20 goes to 1st
        assert_eq!(scores[0].points, 5.0);
        assert_eq!(scores[0].payout, 100);
        assert_eq!(scores[1].payout, 60);
        assert_eq!(scores[2].payout, 40);
        assert_eq!(scores[3].payout, 0);
        assert_eq!(scores.iter().map(|s| s.payout).sum::<i64>(), 200);
    }
}
