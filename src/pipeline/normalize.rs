use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use log::{debug, warn};
use regex::Regex;

use crate::domain::{Event, EventKind, TournamentId, TournamentLog};
use crate::errors::UnparsableTimestamp;

/// Clock formats seen in the logs: with and without seconds.
const TIME_FORMATS: [&str; 2] = ["%I:%M %p", "%I:%M:%S %p"];

/// A tournament's cleaned events plus the count of rows that had to be
/// dropped on the way.
#[derive(Debug, Clone)]
pub struct NormalizedLog {
    pub id: TournamentId,
    pub events: Vec<Event>,
    pub dropped_rows: u32,
}

pub struct Normalizer {
    whitespace: Regex,
    glued_meridiem: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            whitespace: Regex::new(r"\s+").context("Failed to compile whitespace regex")?,
            glued_meridiem: Regex::new(r"(?i)(\d)(am|pm)$")
                .context("Failed to compile meridiem regex")?,
        })
    }

    /// Turns one raw log into cleaned events. Rows with an unrecognized
    /// event kind are ignored; rows with a garbled time are dropped with a
    /// warning. An empty time field keeps the row with a `None` timestamp.
    pub fn normalize(&self, log: &TournamentLog, season_id: &str) -> NormalizedLog {
        let id = TournamentId::new(season_id, log.date);
        let mut events = Vec::with_capacity(log.rows.len());
        let mut dropped_rows = 0u32;

        for row in &log.rows {
            let Some(kind) = classify_event(&row.event) else {
                debug!("{}: ignoring unrecognized event {:?}", id, row.event);
                continue;
            };

            let time_text = row.time.trim().to_string();
            let timestamp = if time_text.is_empty() {
                None
            } else {
                match self.parse_time_of_day(&time_text) {
                    Ok(time) => Some(log.date.and_time(time)),
                    Err(e) => {
                        warn!("{}: dropping {:?} row for {:?}: {}", id, row.event, row.player, e);
                        dropped_rows += 1;
                        continue;
                    }
                }
            };

            let actor = row.eliminated_by.trim();
            events.push(Event {
                tournament: id.clone(),
                kind,
                timestamp,
                time_text,
                subject: row.player.trim().to_string(),
                actor: (!actor.is_empty()).then(|| actor.to_string()),
                raw: row.extra.clone(),
            });
        }

        NormalizedLog {
            id,
            events,
            dropped_rows,
        }
    }

    /// Accepts clock strings with or without seconds, tolerating glued
    /// AM/PM ("7:05PM") and stray whitespace.
    pub fn parse_time_of_day(&self, raw: &str) -> Result<NaiveTime, UnparsableTimestamp> {
        let squeezed = self.whitespace.replace_all(raw.trim(), " ");
        let spaced = self.glued_meridiem.replace(&squeezed, "${1} ${2}");
        let cleaned = spaced.to_uppercase();

        for format in TIME_FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(&cleaned, format) {
                return Ok(time);
            }
        }
        Err(UnparsableTimestamp {
            raw: raw.to_string(),
        })
    }
}

/// Case-insensitive classification on the trimmed event text. BUYIN and
/// ELIMINATED must match exactly; the start/end markers only need to
/// mention TOURNAMENT plus START or END.
pub fn classify_event(text: &str) -> Option<EventKind> {
    let cleaned = text.trim().to_uppercase();
    match cleaned.as_str() {
        "BUYIN" => Some(EventKind::BuyIn),
        "ELIMINATED" => Some(EventKind::Eliminated),
        _ if cleaned.contains("TOURNAMENT") && cleaned.contains("START") => {
            Some(EventKind::TournamentStart)
        }
        _ if cleaned.contains("TOURNAMENT") && cleaned.contains("END") => {
            Some(EventKind::TournamentEnd)
        }
        _ => None,
    }
}

/// Distinct BuyIn subjects, sorted. This set is the tournament's field.
pub fn participants(events: &[Event]) -> Vec<String> {
    let mut names: Vec<String> = events
        .iter()
        .filter(|e| e.kind == EventKind::BuyIn && !e.subject.is_empty())
        .map(|e| e.subject.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Start and end markers, rollover-corrected: an end clock earlier than
/// the start clock means play crossed midnight, so the end gains 24 hours.
/// Multiple markers collapse to the earliest start and the latest end.
pub fn tournament_bounds(events: &[Event]) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let start = events
        .iter()
        .filter(|e| e.kind == EventKind::TournamentStart)
        .filter_map(|e| e.timestamp)
        .min();
    let mut end = events
        .iter()
        .filter(|e| e.kind == EventKind::TournamentEnd)
        .filter_map(|e| e.timestamp)
        .max();

    if let (Some(started), Some(ended)) = (start, end) {
        if ended < started {
            end = Some(ended + Duration::hours(24));
        }
    }
    (start, end)
}
