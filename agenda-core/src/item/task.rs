//! To-do items with a due date.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Item, ItemKind, ItemRecord, ItemRef, Reminder};

labeled_enum! {
    pub enum Priority {
        High => ("Alta", "high"),
        Medium => ("Media", "medium"),
        Low => ("Baja", "low"),
    }
}

labeled_enum! {
    pub enum TaskStatus {
        Pending => ("Pendiente", "pending"),
        InProgress => ("En Progreso", "in-progress"),
        Completed => ("Completada", "completed"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "super::datetime")]
    pub due_date: NaiveDateTime,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "super::datetime")]
    pub due_date: NaiveDateTime,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default)]
    pub reminder: Option<Reminder>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: NaiveDateTime) -> Self {
        TaskDraft {
            title: title.into(),
            description: String::new(),
            due_date,
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            reminder: None,
            is_favorite: false,
        }
    }

    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            status: self.status,
            reminder: self.reminder,
            is_favorite: self.is_favorite,
        }
    }
}

impl ItemRecord for Task {
    const KIND: ItemKind = ItemKind::Task;
    const EXPIRES: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn anchor(&self) -> NaiveDateTime {
        self.due_date
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
            Item::Task(t) => Some(t),
            _ => None,
        }
    }

    fn as_item_ref(&self) -> ItemRef<'_> {
        ItemRef::Task(self)
    }
}
