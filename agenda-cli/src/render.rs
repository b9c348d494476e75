//! Colored terminal rendering for agenda-core types.

use agenda_core::{ItemKind, ItemRef, Notice};
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ItemKind {
    fn render(&self) -> String {
        let tag = format!("[{}]", self.to_string().to_lowercase());
        match self {
            ItemKind::Event => tag.cyan().to_string(),
            ItemKind::Task => tag.yellow().to_string(),
            ItemKind::Birthday => tag.magenta().to_string(),
        }
    }
}

impl Render for ItemRef<'_> {
    fn render(&self) -> String {
        let mut line = format!("{} {} {}", format_time(self), self.kind().render(), self.title());

        if let ItemRef::Event(event) = self {
            line.push_str(&format!(" {}", format!("({})", event.event_type).dimmed()));
        }
        if self.is_favorite() {
            line.push_str(&format!(" {}", "★".yellow()));
        }
        if let Some(reminder) = self.reminder().filter(|r| r.enabled) {
            let label = format!("⏰ {}m", reminder.minutes_before);
            if reminder.triggered {
                line.push_str(&format!(" {}", label.dimmed()));
            } else {
                line.push_str(&format!(" {}", label.green()));
            }
        }

        format!("{}  {}", line, self.id().dimmed())
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        format!("  {}", self.message).green().to_string()
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ if date.year() == today.year() => date.format("%a %b %-d").to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// The time column: "HH:MM" for dated items, "all-day" for birthdays
fn format_time(item: &ItemRef<'_>) -> String {
    match item {
        ItemRef::Birthday(_) => format!("{:>7}", "all-day"),
        _ => format!("{:>7}", item.anchor().format("%H:%M")),
    }
}
