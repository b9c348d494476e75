//! Item types: events, tasks and birthdays.
//!
//! All three kinds share an id, an optional reminder and a favorite flag.
//! On the wire each item carries an `itemType` tag; in memory the union is
//! the `Item` enum (owned) or `ItemRef` (borrowed from the store).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use birthday::{Birthday, BirthdayDraft};
pub use event::{
    Audience, Category, Cost, Event, EventDraft, EventType, Recurrence, RecurrenceType,
};
pub use task::{Priority, Task, TaskDraft, TaskStatus};

/// Declares a closed set of labeled values.
///
/// The label is the stored wire value; the slug is an English alias accepted
/// when parsing.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => ($label:literal, $slug:literal), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label, alias = $slug)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored label
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn slug(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(s) || v.slug().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let choices: Vec<_> = $name::ALL.iter().map(|v| v.slug()).collect();
                        format!("Unknown value '{}'. Expected one of: {}", s, choices.join(", "))
                    })
            }
        }
    };
}

mod birthday;
pub mod datetime;
mod event;
mod task;

/// Discriminant of the item union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Event,
    Task,
    Birthday,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ItemKind::Event => "Event",
            ItemKind::Task => "Task",
            ItemKind::Birthday => "Birthday",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "event" | "evento" => Ok(ItemKind::Event),
            "task" | "tarea" => Ok(ItemKind::Task),
            "birthday" | "cumpleaños" => Ok(ItemKind::Birthday),
            other => Err(format!(
                "Unknown item kind '{}'. Expected event, task or birthday",
                other
            )),
        }
    }
}

/// A reminder attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub enabled: bool,
    pub minutes_before: u32,
    /// Set once the notification has fired for this arm cycle
    #[serde(default)]
    pub triggered: bool,
}

impl Reminder {
    /// A freshly armed reminder.
    pub fn armed(minutes_before: u32) -> Self {
        Reminder {
            enabled: true,
            minutes_before,
            triggered: false,
        }
    }

    /// Whether the reminder should fire at `now` for an item anchored at `anchor`.
    ///
    /// The window is `[anchor - minutes_before, anchor)`.
    pub fn is_due(&self, anchor: NaiveDateTime, now: NaiveDateTime) -> bool {
        if !self.enabled || self.triggered {
            return false;
        }
        let fires_at = anchor - chrono::Duration::minutes(i64::from(self.minutes_before));
        now >= fires_at && now < anchor
    }
}

/// Behavior shared by every stored item kind.
pub trait ItemRecord: Clone + Serialize + for<'de> Deserialize<'de> {
    const KIND: ItemKind;

    /// Whether past items of this kind are pruned on load and save.
    const EXPIRES: bool;

    fn id(&self) -> &str;

    /// The single datetime used to sort, prune and check reminders.
    fn anchor(&self) -> NaiveDateTime;

    /// Title for events and tasks, name for birthdays.
    fn title(&self) -> &str;

    fn description(&self) -> Option<&str>;

    fn reminder(&self) -> Option<&Reminder>;

    fn reminder_mut(&mut self) -> &mut Option<Reminder>;

    fn is_favorite(&self) -> bool;

    fn set_favorite(&mut self, favorite: bool);

    fn from_item(item: Item) -> Option<Self>;

    fn as_item_ref(&self) -> ItemRef<'_>;
}

/// An owned item of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "itemType", rename_all = "lowercase")]
pub enum Item {
    Event(Event),
    Task(Task),
    Birthday(Birthday),
}

/// A borrowed item of any kind.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "itemType", rename_all = "lowercase")]
pub enum ItemRef<'a> {
    Event(&'a Event),
    Task(&'a Task),
    Birthday(&'a Birthday),
}

impl ItemRef<'_> {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemRef::Event(_) => ItemKind::Event,
            ItemRef::Task(_) => ItemKind::Task,
            ItemRef::Birthday(_) => ItemKind::Birthday,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ItemRef::Event(e) => e.id(),
            ItemRef::Task(t) => t.id(),
            ItemRef::Birthday(b) => b.id(),
        }
    }

    pub fn anchor(&self) -> NaiveDateTime {
        match self {
            ItemRef::Event(e) => e.anchor(),
            ItemRef::Task(t) => t.anchor(),
            ItemRef::Birthday(b) => b.anchor(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ItemRef::Event(e) => e.title(),
            ItemRef::Task(t) => t.title(),
            ItemRef::Birthday(b) => b.title(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ItemRef::Event(e) => e.description(),
            ItemRef::Task(t) => t.description(),
            ItemRef::Birthday(b) => b.description(),
        }
    }

    pub fn reminder(&self) -> Option<&Reminder> {
        match self {
            ItemRef::Event(e) => e.reminder(),
            ItemRef::Task(t) => t.reminder(),
            ItemRef::Birthday(b) => b.reminder(),
        }
    }

    pub fn is_favorite(&self) -> bool {
        match self {
            ItemRef::Event(e) => e.is_favorite(),
            ItemRef::Task(t) => t.is_favorite(),
            ItemRef::Birthday(b) => b.is_favorite(),
        }
    }

    /// ISO-8601 rendering of the anchor, used for date-prefix matching.
    pub fn anchor_iso(&self) -> String {
        match self {
            ItemRef::Birthday(b) => b.birth_date.format(datetime::DATE_FORMAT).to_string(),
            other => datetime::format_iso_datetime(&other.anchor()),
        }
    }
}
