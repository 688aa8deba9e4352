use std::collections::BTreeMap;

use crate::config::ChipStackSettings;
use crate::domain::{ChipStackEntry, Elimination, SeasonStanding};

/// Rank that victims missing from the season totals resolve to in the
/// high-value test; far enough down to never qualify. Absent eliminators
/// never collect the bonus either.
const UNRANKED: u32 = 999;

/// Dense rank by drop-2 season points: tied scores share a rank and the
/// next distinct score ranks one higher. Deliberately NOT the sequential
/// rank printed on the season leaderboard.
pub fn dense_ranks(standings: &[SeasonStanding]) -> BTreeMap<String, u32> {
    let mut scores: Vec<f64> = standings.iter().map(|s| s.total_points_drop2).collect();
    scores.sort_by(f64::total_cmp);
    scores.reverse();
    scores.dedup();

    standings
        .iter()
        .map(|standing| {
            let rank = scores
                .iter()
                .position(|score| *score == standing.total_points_drop2)
                .unwrap_or(scores.len()) as u32
                + 1;
            (standing.player.clone(), rank)
        })
        .collect()
}

fn blank_entry(player: &str, settings: &ChipStackSettings, points_bonus: i64) -> ChipStackEntry {
    ChipStackEntry {
        player: player.to_string(),
        base_stack: settings.base_stack,
        points_bonus,
        elim_count: 0,
        elim_bonus: 0,
        repeat_count: 0,
        repeat_bonus: 0,
        hv_elim_count: 0,
        hv_elim_bonus: 0,
        total_stack: 0,
    }
}

/// The "chip and a chair" leaderboard: everyone starts from the base
/// stack, then collects chips for season points, eliminations, repeat
/// victims (capped tiers per ordered pair) and high-value knockouts
/// (a top-ranked victim busted by someone ranked outside the top).
pub fn build_chip_stacks(
    standings: &[SeasonStanding],
    eliminations: &[Elimination],
    settings: &ChipStackSettings,
) -> Vec<ChipStackEntry> {
    let ranks = dense_ranks(standings);

    let mut entries: BTreeMap<String, ChipStackEntry> = standings
        .iter()
        .map(|standing| {
            let points_bonus = (standing.total_points_drop2
                * settings.season_points_multiplier as f64)
                .round() as i64;
            (
                standing.player.clone(),
                blank_entry(&standing.player, settings, points_bonus),
            )
        })
        .collect();

    // only credited pairs count: rows with a blank victim or eliminator
    // carry no bonus
    let mut pair_counts: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    for elim in eliminations {
        let Some(eliminator) = elim.eliminator.as_deref() else {
            continue;
        };
        if eliminator.is_empty() || elim.victim.is_empty() {
            continue;
        }
        *pair_counts
            .entry((eliminator, elim.victim.as_str()))
            .or_insert(0) += 1;
    }

    for (&(eliminator, victim), &count) in &pair_counts {
        let entry = entries
            .entry(eliminator.to_string())
            .or_insert_with(|| blank_entry(eliminator, settings, 0));

        entry.elim_count += count;
        entry.repeat_count += count.saturating_sub(1);
        entry.repeat_bonus += match count {
            0 => 0,
            1 => settings.repeat_pair_tiers[0],
            2 => settings.repeat_pair_tiers[1],
            _ => settings.repeat_pair_tiers[2],
        };

        let victim_rank = ranks.get(victim).copied().unwrap_or(UNRANKED);
        let eliminator_rank = ranks.get(eliminator).copied();
        if victim_rank <= settings.hv_victim_rank_max
            && eliminator_rank.is_some_and(|rank| rank >= settings.hv_eliminator_rank_min)
        {
            entry.hv_elim_count += count;
            entry.hv_elim_bonus += count as i64 * settings.chip_per_high_value_elim;
        }
    }

    let mut stacks: Vec<ChipStackEntry> = entries
        .into_values()
        .map(|mut entry| {
            entry.elim_bonus = entry.elim_count as i64 * settings.chip_per_elimination;
            entry.total_stack = entry.base_stack
                + entry.points_bonus
                + entry.elim_bonus
                + entry.repeat_bonus
                + entry.hv_elim_bonus;
            entry
        })
        .collect();
    stacks.sort_by(|a, b| {
        b.total_stack
            .cmp(&a.total_stack)
            .then(a.player.cmp(&b.player))
    });
    stacks
}
