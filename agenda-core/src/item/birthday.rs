//! Birthdays. Their date is an anniversary, so they never expire.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Item, ItemKind, ItemRecord, ItemRef, Reminder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Birthday {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayDraft {
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reminder: Option<Reminder>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl BirthdayDraft {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        BirthdayDraft {
            name: name.into(),
            birth_date,
            description: None,
            reminder: None,
            is_favorite: false,
        }
    }

    pub fn into_birthday(self, id: String) -> Birthday {
        Birthday {
            id,
            name: self.name,
            birth_date: self.birth_date,
            description: self.description,
            reminder: self.reminder,
            is_favorite: self.is_favorite,
        }
    }
}

impl ItemRecord for Birthday {
    const KIND: ItemKind = ItemKind::Birthday;
    const EXPIRES: bool = false;

    fn id(&self) -> &str {
        &self.id
    }

    fn anchor(&self) -> NaiveDateTime {
        self.birth_date.and_time(NaiveTime::MIN)
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
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
            Item::Birthday(b) => Some(b),
            _ => None,
        }
    }

    fn as_item_ref(&self) -> ItemRef<'_> {
        ItemRef::Birthday(self)
    }
}
