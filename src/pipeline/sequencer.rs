use std::collections::HashSet;

use log::warn;

use crate::domain::{Elimination, Event, EventKind, FinishRecord, TournamentId};

/// A tournament whose result cannot be decided: either everyone was
/// eliminated or several players were never eliminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousWinner {
    pub uneliminated: Vec<String>,
}

/// Earliest elimination per victim, in bust order. Later rows for the same
/// player are double-logging and are discarded. Rows without a usable
/// timestamp keep their log position after every timestamped row.
pub fn dedupe_eliminations(id: &TournamentId, events: &[Event]) -> Vec<Elimination> {
    let mut rows: Vec<&Event> = events
        .iter()
        .filter(|e| e.kind == EventKind::Eliminated && !e.subject.is_empty())
        .collect();
    rows.sort_by_key(|e| (e.timestamp.is_none(), e.timestamp));

    let mut seen = HashSet::new();
    let mut out: Vec<Elimination> = Vec::with_capacity(rows.len());
    for event in rows {
        if !seen.insert(event.subject.as_str()) {
            continue;
        }
        out.push(Elimination {
            tournament: id.clone(),
            order: out.len() as u32 + 1,
            victim: event.subject.clone(),
            eliminator: event.actor.clone(),
            timestamp: event.timestamp,
            time_text: event.time_text.clone(),
        });
    }
    out
}

/// Walks eliminations earliest-to-latest: the k-th player out of an
/// N-player field finishes in place N − k + 1, and the single survivor
/// takes place 1. The resulting places are a permutation of 1..=N.
pub fn assign_places(
    id: &TournamentId,
    participants: &[String],
    eliminations: &[Elimination],
) -> Result<Vec<FinishRecord>, AmbiguousWinner> {
    let field: HashSet<&str> = participants.iter().map(String::as_str).collect();
    let field_size = participants.len() as u32;

    let mut finishes = Vec::with_capacity(participants.len());
    let mut eliminated = HashSet::new();
    let mut bust_order = 0u32;
    for elim in eliminations {
        if !field.contains(elim.victim.as_str()) {
            warn!(
                "{id}: eliminated player {:?} never bought in, skipping",
                elim.victim
            );
            continue;
        }
        bust_order += 1;
        eliminated.insert(elim.victim.as_str());
        finishes.push(FinishRecord {
            tournament: id.clone(),
            player: elim.victim.clone(),
            place: field_size - bust_order + 1,
            field_size,
        });
    }

    let uneliminated: Vec<String> = participants
        .iter()
        .filter(|p| !eliminated.contains(p.as_str()))
        .cloned()
        .collect();
    if uneliminated.len() != 1 {
        return Err(AmbiguousWinner { uneliminated });
    }

    finishes.push(FinishRecord {
        tournament: id.clone(),
        player: uneliminated.into_iter().next().unwrap_or_default(),
        place: 1,
        field_size,
    });
    finishes.sort_by_key(|f| f.place);
    Ok(finishes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::BTreeMap;

    fn id() -> TournamentId {
        TournamentId::new("spring_2026", NaiveDate::from_ymd_opt(2026, 2, 10).unwrap())
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn elim_event(subject: &str, actor: &str, timestamp: Option<NaiveDateTime>) -> Event {
        Event {
            tournament: id(),
            kind: EventKind::Eliminated,
            timestamp,
            time_text: String::new(),
            subject: subject.to_string(),
            actor: (!actor.is_empty()).then(|| actor.to_string()),
            raw: BTreeMap::new(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_earliest_elimination_per_player() {
        let events = vec![
            elim_event("Bob", "Alice", Some(at(21, 0))),
            elim_event("Bob", "Carol", Some(at(20, 0))),
            elim_event("Carol", "Alice", Some(at(22, 0))),
        ];
        let elims = dedupe_eliminations(&id(), &events);

        assert_eq!(elims.len(), 2);
        assert_eq!(elims[0].victim, "Bob");
        assert_eq!(elims[0].eliminator.as_deref(), Some("Carol"));
        assert_eq!(elims[0].order, 1);
        assert_eq!(elims[1].victim, "Carol");
    }

    #[test]
    fn untimestamped_eliminations_sort_last() {
        let events = vec![
            elim_event("Dave", "", None),
            elim_event("Bob", "Alice", Some(at(20, 0))),
        ];
        let elims = dedupe_eliminations(&id(), &events);

        assert_eq!(elims[0].victim, "Bob");
        assert_eq!(elims[1].victim, "Dave");
    }

    #[test]
    fn places_form_a_permutation() {
        let participants = names(&["Alice", "Bob", "Carol", "Dave"]);
        let events = vec![
            elim_event("Dave", "Alice", Some(at(20, 0))),
            elim_event("Bob", "Alice", Some(at(21, 0))),
            elim_event("Carol", "Alice", Some(at(22, 0))),
        ];
        let elims = dedupe_eliminations(&id(), &events);
        let finishes = assign_places(&id(), &participants, &elims).unwrap();

        let mut places: Vec<u32> = finishes.iter().map(|f| f.place).collect();
        places.sort();
        assert_eq!(places, vec![1, 2, 3, 4]);

        let by_player: Vec<(&str, u32)> = finishes
            .iter()
            .map(|f| (f.player.as_str(), f.place))
            .collect();
        assert!(by_player.contains(&("Alice", 1)));
        assert!(by_player.contains(&("Carol", 2)));
        assert!(by_player.contains(&("Bob", 3)));
        assert!(by_player.contains(&("Dave", 4)));
    }

    #[test]
    fn two_survivors_is_ambiguous() {
        let participants = names(&["Alice", "Bob", "Carol"]);
        let events = vec![elim_event("Carol", "Alice", Some(at(20, 0)))];
        let elims = dedupe_eliminations(&id(), &events);

        let err = assign_places(&id(), &participants, &elims).unwrap_err();
        assert_eq!(err.uneliminated, names(&["Alice", "Bob"]));
    }

    #[test]
    fn everyone_eliminated_is_ambiguous() {
        let participants = names(&["Alice", "Bob"]);
        let events = vec![
            elim_event("Alice", "Bob", Some(at(20, 0))),
            elim_event("Bob", "", Some(at(21, 0))),
        ];
        let elims = dedupe_eliminations(&id(), &events);

        let err = assign_places(&id(), &participants, &elims).unwrap_err();
        assert!(err.uneliminated.is_empty());
    }

    #[test]
    fn unknown_victims_do_not_consume_places() {
        let participants = names(&["Alice", "Bob"]);
        let events = vec![
            elim_event("Zed", "Alice", Some(at(20, 0))),
            elim_event("Bob", "Alice", Some(at(21, 0))),
        ];
        let elims = dedupe_eliminations(&id(), &events);
        let finishes = assign_places(&id(), &participants, &elims).unwrap();

        assert_eq!(finishes.len(), 2);
        assert_eq!(finishes[0].player, "Alice");
        assert_eq!(finishes[0].place, 1);
        assert_eq!(finishes[1].player, "Bob");
        assert_eq!(finishes[1].place, 2);
    }
}
