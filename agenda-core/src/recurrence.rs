//! Expansion of an event's recurrence rule into concrete occurrences.
//!
//! Daily and custom rules are translated into iCalendar RRULEs and expanded
//! with the `rrule` crate; annual rules step by calendar years. Event
//! datetimes are local wall-clock values, so they are fed to the expander as
//! floating UTC and read back with `naive_utc()`.

use chrono::{Months, NaiveDateTime, Timelike, Weekday};
use rrule::RRuleSet;
use uuid::Uuid;

use crate::constants::{
    ANNUAL_OCCURRENCES, CUSTOM_HORIZON_MONTHS, DAILY_OCCURRENCES, MAX_OCCURRENCES,
};
use crate::error::{AgendaError, AgendaResult};
use crate::item::{Event, Recurrence, RecurrenceType};

/// Upper bound on raw dates pulled from the expander before filtering.
/// A year of days plus slack.
const EXPANSION_LIMIT: u16 = 400;

const WEEKDAY_LABELS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Lunes"),
    (Weekday::Tue, "Martes"),
    (Weekday::Wed, "Miércoles"),
    (Weekday::Thu, "Jueves"),
    (Weekday::Fri, "Viernes"),
    (Weekday::Sat, "Sábado"),
    (Weekday::Sun, "Domingo"),
];

/// Parse a weekday name. Accepts the localized labels (with or without
/// accents) and English names, ignoring case.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    if let Some((day, _)) = WEEKDAY_LABELS
        .iter()
        .find(|(_, label)| label.to_lowercase() == name)
    {
        return Some(*day);
    }
    match name.as_str() {
        "miercoles" => Some(Weekday::Wed),
        "sabado" => Some(Weekday::Sat),
        other => other.parse::<Weekday>().ok(),
    }
}

fn rrule_day(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

fn ics_utc(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Expand `rule` (an RRULE body) starting at `start`, returning raw dates
/// including any in the past.
///
/// RRULE datetimes have whole-second precision, so any sub-second part of
/// `start` is added back onto every expanded date.
fn expand_rrule(start: NaiveDateTime, rule: &str) -> AgendaResult<Vec<NaiveDateTime>> {
    let fraction = start - start.with_nanosecond(0).unwrap_or(start);
    let rrule_str = format!("DTSTART:{}\nRRULE:{}", ics_utc(&start), rule);

    let rrule_set: RRuleSet = rrule_str
        .parse()
        .map_err(|e| AgendaError::Recurrence(format!("Failed to parse '{}': {}", rule, e)))?;

    let result = rrule_set.all(EXPANSION_LIMIT);

    Ok(result
        .dates
        .iter()
        .map(|dt| dt.naive_utc() + fraction)
        .collect())
}

/// Month arithmetic that clamps to the last day of shorter months
/// (Feb 29 + 12 months is Feb 28).
fn add_months(dt: NaiveDateTime, months: u32) -> AgendaResult<NaiveDateTime> {
    dt.checked_add_months(Months::new(months))
        .ok_or_else(|| AgendaError::Recurrence(format!("Date out of range: {}", dt)))
}

/// One date per year from `base`, base year included.
fn annual_dates(base: NaiveDateTime) -> AgendaResult<Vec<NaiveDateTime>> {
    (0..ANNUAL_OCCURRENCES)
        .map(|year| add_months(base, 12 * year))
        .collect()
}

/// Raw candidate dates for a custom rule.
fn custom_dates(base: NaiveDateTime, rule: &Recurrence) -> AgendaResult<Vec<NaiveDateTime>> {
    let mut days = Vec::new();
    for name in rule.days_of_week.iter().flatten() {
        match parse_weekday(name) {
            Some(day) if !days.contains(&day) => days.push(day),
            Some(_) => {}
            None => tracing::warn!(day = %name, "Ignoring unknown weekday in recurrence rule"),
        }
    }

    if days.is_empty() {
        return Ok(Vec::new());
    }

    let horizon = add_months(base, CUSTOM_HORIZON_MONTHS)?;
    let until = match rule.end_date {
        Some(end) => end.and_time(base.time()).min(horizon),
        None => horizon,
    };

    if until < base {
        return Ok(Vec::new());
    }

    let byday: Vec<_> = days.iter().map(|d| rrule_day(*d)).collect();
    expand_rrule(
        base,
        &format!("FREQ=DAILY;BYDAY={};UNTIL={}", byday.join(","), ics_utc(&until)),
    )
}

fn single_occurrence(base: &Event, now: NaiveDateTime) -> Vec<Event> {
    if base.datetime > now {
        vec![base.clone()]
    } else {
        Vec::new()
    }
}

fn occurrence_of(base: &Event, datetime: NaiveDateTime) -> Event {
    Event {
        id: Uuid::new_v4().to_string(),
        datetime,
        ..base.clone()
    }
}

/// Expand `base` into the occurrences its recurrence rule describes.
///
/// Every returned occurrence is strictly after `now`, and at most
/// `MAX_OCCURRENCES` are returned. A `once` rule (or an unconstrained custom
/// rule) yields `base` itself, unchanged, if it lies in the future.
pub fn generate_occurrences(base: &Event, now: NaiveDateTime) -> AgendaResult<Vec<Event>> {
    let rule = &base.recurrence;

    let (dates, limit) = match rule.kind {
        RecurrenceType::Once => return Ok(single_occurrence(base, now)),
        RecurrenceType::Custom if rule.is_unconstrained() => {
            return Ok(single_occurrence(base, now));
        }
        RecurrenceType::Daily => (
            expand_rrule(
                base.datetime,
                &format!("FREQ=DAILY;COUNT={}", DAILY_OCCURRENCES),
            )?,
            MAX_OCCURRENCES,
        ),
        RecurrenceType::Annual => (annual_dates(base.datetime)?, MAX_OCCURRENCES),
        RecurrenceType::Custom => {
            let requested = rule
                .occurrences
                .filter(|n| *n > 0)
                .map(|n| n as usize)
                .unwrap_or(MAX_OCCURRENCES);
            (
                custom_dates(base.datetime, rule)?,
                requested.min(MAX_OCCURRENCES),
            )
        }
    };

    Ok(dates
        .into_iter()
        .filter(|dt| *dt > now)
        .take(limit)
        .map(|dt| occurrence_of(base, dt))
        .collect())
}
