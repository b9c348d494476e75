//! Parsing of user-typed dates, times and durations.

use agenda_core::item::datetime::parse_iso_datetime;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

/// Words fuzzydate doesn't know, mapped to the English it does. Covers
/// short English forms plus the Spanish names used throughout the stored
/// data (weekday labels like "Lunes", month names, "hoy" and "mañana").
const WORD_ALIASES: &[(&str, &str)] = &[
    ("mon", "monday"),
    ("tue", "tuesday"),
    ("tues", "tuesday"),
    ("wed", "wednesday"),
    ("thu", "thursday"),
    ("thurs", "thursday"),
    ("fri", "friday"),
    ("sat", "saturday"),
    ("sun", "sunday"),
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("sept", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
    ("hoy", "today"),
    ("mañana", "tomorrow"),
    ("manana", "tomorrow"),
    ("lunes", "monday"),
    ("lun", "monday"),
    ("martes", "tuesday"),
    ("miércoles", "wednesday"),
    ("miercoles", "wednesday"),
    ("mié", "wednesday"),
    ("mie", "wednesday"),
    ("jueves", "thursday"),
    ("jue", "thursday"),
    ("viernes", "friday"),
    ("vie", "friday"),
    ("sábado", "saturday"),
    ("sabado", "saturday"),
    ("sáb", "saturday"),
    ("sab", "saturday"),
    ("domingo", "sunday"),
    ("dom", "sunday"),
    ("enero", "january"),
    ("ene", "january"),
    ("febrero", "february"),
    ("marzo", "march"),
    ("abril", "april"),
    ("abr", "april"),
    ("mayo", "may"),
    ("junio", "june"),
    ("julio", "july"),
    ("agosto", "august"),
    ("ago", "august"),
    ("septiembre", "september"),
    ("setiembre", "september"),
    ("octubre", "october"),
    ("noviembre", "november"),
    ("diciembre", "december"),
    ("dic", "december"),
];

/// Lowercase `input` and replace every aliased word with its English form.
fn normalize_words(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            WORD_ALIASES
                .iter()
                .find(|(alias, _)| *alias == word)
                .map_or(word, |(_, english)| *english)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an ISO datetime ("2030-03-20T15:00") or natural language
/// ("next friday 6pm") into a local wall-clock datetime.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    if let Some(dt) = parse_iso_datetime(input) {
        return Ok(dt);
    }

    fuzzydate::parse(&normalize_words(input))
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
}

/// Parse a calendar date; natural language inputs keep only their date part.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    parse_datetime(input).map(|dt| dt.date())
}

/// Parse a reminder lead time such as "15m", "1h 30m" or "2days" into minutes.
pub fn parse_lead_minutes(input: &str) -> Result<u32> {
    let duration = humantime::parse_duration(input.trim())
        .map_err(|e| anyhow::anyhow!("Could not parse duration \"{}\": {}", input, e))?;

    let minutes = duration.as_secs() / 60;
    if minutes == 0 {
        anyhow::bail!("Reminders need at least one minute of lead time");
    }

    u32::try_from(minutes).map_err(|_| anyhow::anyhow!("Lead time \"{}\" is too long", input))
}
