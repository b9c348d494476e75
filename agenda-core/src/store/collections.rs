//! The three in-memory collections and how each maps onto durable records.

use std::collections::BTreeMap;

use crate::constants::{BIRTHDAYS_KEY, EVENTS_KEY, FAVORITES_KEY, REMINDERS_KEY, TASKS_KEY};
use crate::error::AgendaResult;
use crate::item::{Birthday, Event, ItemRecord, ItemRef, Reminder, Task};

/// Every live item, one vector per kind, each sorted by anchor.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub events: Vec<Event>,
    pub tasks: Vec<Task>,
    pub birthdays: Vec<Birthday>,
}

impl Collections {
    /// All items, events first, then tasks, then birthdays.
    pub fn iter(&self) -> impl Iterator<Item = ItemRef<'_>> {
        self.events
            .iter()
            .map(ItemRecord::as_item_ref)
            .chain(self.tasks.iter().map(ItemRecord::as_item_ref))
            .chain(self.birthdays.iter().map(ItemRecord::as_item_ref))
    }

    pub fn len(&self) -> usize {
        self.events.len() + self.tasks.len() + self.birthdays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An item kind with its own durable record and in-memory slot.
pub trait Collection: ItemRecord {
    /// Durable record holding this collection.
    const KEY: &'static str;

    fn slot(collections: &Collections) -> &Vec<Self>;

    fn slot_mut(collections: &mut Collections) -> &mut Vec<Self>;

    /// Auxiliary records rebuilt from scratch whenever this collection is saved.
    fn side_tables(_items: &[Self]) -> AgendaResult<Vec<(&'static str, String)>> {
        Ok(Vec::new())
    }
}

impl Collection for Event {
    const KEY: &'static str = EVENTS_KEY;

    fn slot(collections: &Collections) -> &Vec<Self> {
        &collections.events
    }

    fn slot_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.events
    }

    fn side_tables(items: &[Self]) -> AgendaResult<Vec<(&'static str, String)>> {
        Ok(vec![
            (
                REMINDERS_KEY,
                serde_json::to_string(&reminder_table(items))?,
            ),
            (
                FAVORITES_KEY,
                serde_json::to_string(&favorite_ids(items))?,
            ),
        ])
    }
}

impl Collection for Task {
    const KEY: &'static str = TASKS_KEY;

    fn slot(collections: &Collections) -> &Vec<Self> {
        &collections.tasks
    }

    fn slot_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.tasks
    }
}

impl Collection for Birthday {
    const KEY: &'static str = BIRTHDAYS_KEY;

    fn slot(collections: &Collections) -> &Vec<Self> {
        &collections.birthdays
    }

    fn slot_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.birthdays
    }
}

/// Event id -> reminder, for every event that has one.
pub(crate) fn reminder_table(events: &[Event]) -> BTreeMap<String, Reminder> {
    events
        .iter()
        .filter_map(|e| e.reminder.clone().map(|r| (e.id.clone(), r)))
        .collect()
}

pub(crate) fn favorite_ids(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.is_favorite)
        .map(|e| e.id.clone())
        .collect()
}

/// Overlay persisted side-tables onto freshly loaded events.
///
/// A table that exists is authoritative: events missing from it lose their
/// reminder or favorite flag.
pub(crate) fn apply_side_tables(
    events: &mut [Event],
    reminders: Option<&BTreeMap<String, Reminder>>,
    favorites: Option<&[String]>,
) {
    for event in events.iter_mut() {
        if let Some(reminders) = reminders {
            event.reminder = reminders.get(&event.id).cloned();
        }
        if let Some(favorites) = favorites {
            event.is_favorite = favorites.contains(&event.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::EventDraft;
    use chrono::NaiveDate;

    fn event(id: &str) -> Event {
        let datetime = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        EventDraft::new(format!("Event {}", id), datetime).into_event(id.to_string())
    }

    #[test]
    fn side_tables_are_built_from_live_events_only() {
        let mut a = event("a");
        a.reminder = Some(Reminder::armed(30));
        a.is_favorite = true;
        let b = event("b");

        let tables = Event::side_tables(&[a, b]).unwrap();

        assert_eq!(tables[0].0, REMINDERS_KEY);
        assert_eq!(
            tables[0].1,
            r#"{"a":{"enabled":true,"minutesBefore":30,"triggered":false}}"#
        );
        assert_eq!(tables[1], (FAVORITES_KEY, r#"["a"]"#.to_string()));
    }

    #[test]
    fn present_side_tables_override_inline_state() {
        let mut a = event("a");
        a.reminder = Some(Reminder::armed(5));
        a.is_favorite = true;
        let mut events = vec![a, event("b")];

        let mut reminders = BTreeMap::new();
        reminders.insert("b".to_string(), Reminder::armed(10));
        let favorites = vec!["b".to_string()];

        apply_side_tables(&mut events, Some(&reminders), Some(&favorites));

        assert_eq!(events[0].reminder, None);
        assert!(!events[0].is_favorite);
        assert_eq!(events[1].reminder, Some(Reminder::armed(10)));
        assert!(events[1].is_favorite);
    }

    #[test]
    fn absent_side_tables_keep_inline_state() {
        let mut a = event("a");
        a.reminder = Some(Reminder::armed(5));
        a.is_favorite = true;
        let mut events = vec![a.clone()];

        apply_side_tables(&mut events, None, None);

        assert_eq!(events[0], a);
    }

    #[test]
    fn iter_chains_all_kinds() {
        let collections = Collections {
            events: vec![event("a"), event("b")],
            ..Default::default()
        };

        assert_eq!(collections.len(), 2);
        assert_eq!(
            collections.iter().map(|i| i.id().to_string()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }
}
