//! Cultural events and their recurrence rules.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Item, ItemKind, ItemRecord, ItemRef, Reminder};

labeled_enum! {
    /// What kind of activity an event is.
    pub enum EventType {
        Workshop => ("Taller", "workshop"),
        Festival => ("Festival", "festival"),
        Exhibition => ("Exposicion", "exhibition"),
        CulturalTakeover => ("Toma Cultural", "takeover"),
        Gathering => ("Encuentros", "gathering"),
        FilmScreening => ("Proyeccion de cine", "screening"),
        Other => ("Otros", "other"),
    }
}

labeled_enum! {
    /// Cultural area an event belongs to.
    pub enum Category {
        PerformingArts => ("Artes Escenicas y Musicales", "performing-arts"),
        VisualArts => ("Artes Visuales y del espacio", "visual-arts"),
        Film => ("Cine y medios audiovisual", "film"),
        Books => ("Promocion del Libro y la Lectura", "books"),
        Heritage => ("Patrimonio cultural", "heritage"),
    }
}

labeled_enum! {
    pub enum Audience {
        Children => ("Infantil", "children"),
        Adults => ("Adultos", "adults"),
        Everyone => ("Todos", "everyone"),
    }
}

labeled_enum! {
    pub enum RecurrenceType {
        Once => ("una vez", "once"),
        Daily => ("diaria", "daily"),
        Annual => ("anual", "annual"),
        Custom => ("personalizada", "custom"),
    }
}

/// How an event repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub kind: RecurrenceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Localized weekday names, e.g. "Lunes"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
}

impl Recurrence {
    pub fn once() -> Self {
        Recurrence::simple(RecurrenceType::Once)
    }

    pub fn simple(kind: RecurrenceType) -> Self {
        Recurrence {
            kind,
            end_date: None,
            days_of_week: None,
            occurrences: None,
        }
    }

    /// True when a custom rule carries no constraint at all.
    pub fn is_unconstrained(&self) -> bool {
        let no_days = self.days_of_week.as_ref().is_none_or(|d| d.is_empty());
        let no_count = self.occurrences.is_none_or(|n| n == 0);
        no_days && self.end_date.is_none() && no_count
    }
}

impl Default for Recurrence {
    fn default() -> Self {
        Recurrence::once()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cost {
    pub is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl Cost {
    pub fn free() -> Self {
        Cost {
            is_free: true,
            amount: None,
        }
    }
}

/// A cultural event (one concrete occurrence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub event_type: EventType,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(with = "super::datetime")]
    pub datetime: NaiveDateTime,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
    #[serde(default)]
    pub responsible_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub social_media: String,
    pub target_audience: Audience,
    pub cost: Cost,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
}

/// An event as submitted by a form, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub event_type: EventType,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(with = "super::datetime")]
    pub datetime: NaiveDateTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub map_link: Option<String>,
    #[serde(default)]
    pub responsible_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub social_media: String,
    pub target_audience: Audience,
    pub cost: Cost,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub reminder: Option<Reminder>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl EventDraft {
    /// Minimal draft; the remaining fields take neutral defaults.
    pub fn new(title: impl Into<String>, datetime: NaiveDateTime) -> Self {
        EventDraft {
            title: title.into(),
            event_type: EventType::Other,
            description: String::new(),
            category: Category::PerformingArts,
            datetime,
            location: String::new(),
            map_link: None,
            responsible_name: String::new(),
            phone: String::new(),
            social_media: String::new(),
            target_audience: Audience::Everyone,
            cost: Cost::free(),
            image: None,
            reminder: None,
            is_favorite: false,
            recurrence: Recurrence::once(),
        }
    }

    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            event_type: self.event_type,
            description: self.description,
            category: self.category,
            datetime: self.datetime,
            location: self.location,
            map_link: self.map_link,
            responsible_name: self.responsible_name,
            phone: self.phone,
            social_media: self.social_media,
            target_audience: self.target_audience,
            cost: self.cost,
            image: self.image,
            reminder: self.reminder,
            is_favorite: self.is_favorite,
            recurrence: self.recurrence,
        }
    }
}

impl ItemRecord for Event {
    const KIND: ItemKind = ItemKind::Event;
    const EXPIRES: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn anchor(&self) -> NaiveDateTime {
        self.datetime
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn reminder(&self) -> Option<&Reminder> {
        self.reminder.as_ref()
    }

    fn reminder_mut(&mut self) -> &mut Option<Reminder> {
        &mut self.reminder
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    fn set_favorite(&mut self, favorite: bool) {
        self.is_favorite = favorite;
    }

    fn from_item(item: Item) -> Option<Self> {
        match item {
            Item::Event(e) => Some(e),
            _ => None,
        }
    }

    fn as_item_ref(&self) -> ItemRef<'_> {
        ItemRef::Event(self)
    }
}
