//! The item store: owns every event, task and birthday, and persists each
//! mutation through a `Persistence` adapter.
//!
//! Saving a collection prunes expired items, sorts by anchor, writes the
//! primary record and (for events) rebuilds the reminder and favorite
//! side-tables. In-memory state is replaced even when the write fails; the
//! failure is logged and returned to the caller.

mod collections;
mod feedback;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::constants::{FAVORITES_KEY, REMINDERS_KEY};
use crate::error::{AgendaError, AgendaResult};
use crate::filter::{self, ItemFilter};
use crate::item::{
    Birthday, BirthdayDraft, Event, EventDraft, Item, ItemKind, ItemRecord, ItemRef, Reminder,
    Task, TaskDraft,
};
use crate::persistence::Persistence;
use crate::recurrence::generate_occurrences;

pub use collections::{Collection, Collections};
pub use feedback::{Feedback, Notice};

use collections::apply_side_tables;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Drop expired items (for kinds that expire) and sort by anchor.
fn prepare<T: ItemRecord>(mut items: Vec<T>, now: NaiveDateTime) -> Vec<T> {
    if T::EXPIRES {
        items.retain(|item| item.anchor() > now);
    }
    items.sort_by_key(|item| item.anchor());
    items
}

fn persistence_failure(key: &str, e: AgendaError) -> AgendaError {
    tracing::error!(key, error = %e, "Persistence failure");
    match e {
        AgendaError::Persistence(_) => e,
        other => AgendaError::Persistence(other.to_string()),
    }
}

pub struct ItemStore<P: Persistence> {
    persistence: P,
    clock: Box<dyn Clock>,
    collections: Collections,
    filters: ItemFilter,
}

impl<P: Persistence> ItemStore<P> {
    /// An empty store on the system clock. Call `load` to read persisted state.
    pub fn new(persistence: P) -> Self {
        ItemStore::with_clock(persistence, SystemClock)
    }

    pub fn with_clock(persistence: P, clock: impl Clock + 'static) -> Self {
        ItemStore {
            persistence,
            clock: Box::new(clock),
            collections: Collections::default(),
            filters: ItemFilter::default(),
        }
    }

    /// Create a store and load its persisted state.
    pub fn open(persistence: P) -> AgendaResult<Self> {
        let mut store = ItemStore::new(persistence);
        store.load()?;
        Ok(store)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    // QUERIES:

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn events(&self) -> &[Event] {
        &self.collections.events
    }

    pub fn tasks(&self) -> &[Task] {
        &self.collections.tasks
    }

    pub fn birthdays(&self) -> &[Birthday] {
        &self.collections.birthdays
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.collections.events.iter().find(|e| e.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.collections.tasks.iter().find(|t| t.id == id)
    }

    pub fn birthday(&self, id: &str) -> Option<&Birthday> {
        self.collections.birthdays.iter().find(|b| b.id == id)
    }

    pub fn get(&self, kind: ItemKind, id: &str) -> Option<ItemRef<'_>> {
        match kind {
            ItemKind::Event => self.event(id).map(ItemRecord::as_item_ref),
            ItemKind::Task => self.task(id).map(ItemRecord::as_item_ref),
            ItemKind::Birthday => self.birthday(id).map(ItemRecord::as_item_ref),
        }
    }

    pub fn filters(&self) -> &ItemFilter {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: ItemFilter) {
        self.filters = filters;
    }

    /// Items matching the current filters, sorted by anchor.
    pub fn items(&self) -> Vec<ItemRef<'_>> {
        filter::visible_items(&self.collections, &self.filters)
    }

    /// Every favorite item across all kinds, sorted by anchor.
    pub fn favorites(&self) -> Vec<ItemRef<'_>> {
        filter::favorite_items(&self.collections)
    }

    // LOAD + SAVE:

    /// Replace in-memory state with what the durable store holds.
    ///
    /// Side-tables are applied onto events, then expired events and tasks
    /// are dropped.
    pub fn load(&mut self) -> AgendaResult<()> {
        let now = self.now();

        let mut events: Vec<Event> = self.read_collection()?;
        let reminders: Option<BTreeMap<String, Reminder>> = self.read_side_table(REMINDERS_KEY)?;
        let favorites: Option<Vec<String>> = self.read_side_table(FAVORITES_KEY)?;
        apply_side_tables(&mut events, reminders.as_ref(), favorites.as_deref());

        let tasks: Vec<Task> = self.read_collection()?;
        let birthdays: Vec<Birthday> = self.read_collection()?;

        self.collections = Collections {
            events: prepare(events, now),
            tasks: prepare(tasks, now),
            birthdays: prepare(birthdays, now),
        };

        tracing::debug!(
            events = self.collections.events.len(),
            tasks = self.collections.tasks.len(),
            birthdays = self.collections.birthdays.len(),
            "Loaded items"
        );
        Ok(())
    }

    /// Prune, sort, persist and install `items` as the collection of kind `T`.
    pub fn save<T: Collection>(&mut self, items: Vec<T>) -> AgendaResult<()> {
        let items = prepare(items, self.now());
        let result = self.write_collection(&items);

        tracing::debug!(kind = %T::KIND, count = items.len(), "Saved collection");
        *T::slot_mut(&mut self.collections) = items;
        result
    }

    fn read_record<D: DeserializeOwned>(&self, key: &str) -> AgendaResult<Option<D>> {
        let content = self
            .persistence
            .get(key)
            .map_err(|e| persistence_failure(key, e))?;

        match content {
            Some(content) => {
                let value = serde_json::from_str(&content).map_err(|e| {
                    tracing::error!(key, error = %e, "Unreadable record");
                    AgendaError::from(e)
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Read a side-table. An unreadable one is treated as absent, so the
    /// inline reminder and favorite fields of events stand.
    fn read_side_table<D: DeserializeOwned>(&self, key: &str) -> AgendaResult<Option<D>> {
        match self.read_record(key) {
            Err(AgendaError::Serialization(e)) => {
                tracing::warn!(key, error = %e, "Ignoring unreadable side-table");
                Ok(None)
            }
            other => other,
        }
    }

    /// Read a collection, skipping entries that are malformed or of another kind.
    fn read_collection<T: Collection>(&self) -> AgendaResult<Vec<T>> {
        let records: Vec<serde_json::Value> = match self.read_record(T::KEY)? {
            Some(records) => records,
            None => return Ok(Vec::new()),
        };

        let items = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Item>(record) {
                Ok(item) => {
                    let item = T::from_item(item);
                    if item.is_none() {
                        tracing::warn!(key = T::KEY, "Skipping item of another kind");
                    }
                    item
                }
                Err(e) => {
                    tracing::warn!(key = T::KEY, error = %e, "Skipping malformed item");
                    None
                }
            })
            .collect();

        Ok(items)
    }

    fn write_collection<T: Collection>(&mut self, items: &[T]) -> AgendaResult<()> {
        let records: Vec<ItemRef<'_>> = items.iter().map(ItemRecord::as_item_ref).collect();
        let content = serde_json::to_string(&records)?;
        self.write(T::KEY, &content)?;

        for (key, content) in T::side_tables(items)? {
            self.write(key, &content)?;
        }
        Ok(())
    }

    fn write(&mut self, key: &str, content: &str) -> AgendaResult<()> {
        self.persistence
            .set(key, content)
            .map_err(|e| persistence_failure(key, e))
    }

    // MUTATIONS:

    /// Expand `draft` through its recurrence rule and add every occurrence
    /// not already present (same title and datetime).
    pub fn add_event(&mut self, draft: EventDraft) -> AgendaResult<Notice> {
        let base = draft.into_event(new_id());
        let occurrences = generate_occurrences(&base, self.now())?;

        if occurrences.is_empty() {
            return Err(AgendaError::EmptyRecurrence);
        }

        let existing = &self.collections.events;
        let fresh: Vec<Event> = occurrences
            .into_iter()
            .filter(|new| {
                !existing
                    .iter()
                    .any(|e| e.title == new.title && e.datetime == new.datetime)
            })
            .collect();

        if fresh.is_empty() {
            return Err(AgendaError::DuplicateEvent);
        }

        let count = fresh.len();
        tracing::info!(title = %base.title, count, "Creating events");

        let mut events = self.collections.events.clone();
        events.extend(fresh);
        self.save(events)?;

        Ok(Notice::new(format!("{} event(s) created", count)))
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> AgendaResult<Notice> {
        let task = draft.into_task(new_id());
        tracing::info!(id = %task.id, title = %task.title, "Creating task");

        let mut tasks = self.collections.tasks.clone();
        tasks.push(task);
        self.save(tasks)?;

        Ok(Notice::new("Task created"))
    }

    pub fn add_birthday(&mut self, draft: BirthdayDraft) -> AgendaResult<Notice> {
        let birthday = draft.into_birthday(new_id());
        tracing::info!(id = %birthday.id, name = %birthday.name, "Adding birthday");

        let mut birthdays = self.collections.birthdays.clone();
        birthdays.push(birthday);
        self.save(birthdays)?;

        Ok(Notice::new("Birthday added"))
    }

    /// Replace the event with the same id. Unknown ids are a silent no-op.
    pub fn update_event(&mut self, event: Event) -> AgendaResult<Notice> {
        self.replace(event)?;
        Ok(Notice::new("Event updated"))
    }

    pub fn update_task(&mut self, task: Task) -> AgendaResult<Notice> {
        self.replace(task)?;
        Ok(Notice::new("Task updated"))
    }

    pub fn update_birthday(&mut self, birthday: Birthday) -> AgendaResult<Notice> {
        self.replace(birthday)?;
        Ok(Notice::new("Birthday updated"))
    }

    pub fn delete_event(&mut self, id: &str) -> AgendaResult<Notice> {
        self.remove::<Event>(id)?;
        Ok(Notice::new("Event deleted"))
    }

    pub fn delete_task(&mut self, id: &str) -> AgendaResult<Notice> {
        self.remove::<Task>(id)?;
        Ok(Notice::new("Task deleted"))
    }

    pub fn delete_birthday(&mut self, id: &str) -> AgendaResult<Notice> {
        self.remove::<Birthday>(id)?;
        Ok(Notice::new("Birthday deleted"))
    }

    pub fn toggle_favorite(&mut self, kind: ItemKind, id: &str) -> AgendaResult<Notice> {
        let favorite = match kind {
            ItemKind::Event => self.toggle_favorite_in::<Event>(id)?,
            ItemKind::Task => self.toggle_favorite_in::<Task>(id)?,
            ItemKind::Birthday => self.toggle_favorite_in::<Birthday>(id)?,
        };

        Ok(Notice::new(if favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        }))
    }

    /// Arm a reminder `minutes_before` the item's anchor. Re-arms a reminder
    /// that already fired.
    pub fn toggle_reminder(
        &mut self,
        kind: ItemKind,
        id: &str,
        minutes_before: u32,
    ) -> AgendaResult<Notice> {
        let arm = |reminder: &mut Option<Reminder>| *reminder = Some(Reminder::armed(minutes_before));
        match kind {
            ItemKind::Event => self.modify::<Event>(id, |e| arm(e.reminder_mut()))?,
            ItemKind::Task => self.modify::<Task>(id, |t| arm(t.reminder_mut()))?,
            ItemKind::Birthday => self.modify::<Birthday>(id, |b| arm(b.reminder_mut()))?,
        }
        Ok(Notice::new("Reminder set"))
    }

    /// Record that an item's reminder has fired and persist its collection.
    pub(crate) fn mark_triggered(&mut self, kind: ItemKind, id: &str) -> AgendaResult<()> {
        fn trigger(reminder: &mut Option<Reminder>) {
            if let Some(reminder) = reminder {
                reminder.triggered = true;
            }
        }
        match kind {
            ItemKind::Event => self.modify::<Event>(id, |e| trigger(e.reminder_mut())),
            ItemKind::Task => self.modify::<Task>(id, |t| trigger(t.reminder_mut())),
            ItemKind::Birthday => self.modify::<Birthday>(id, |b| trigger(b.reminder_mut())),
        }
    }

    fn replace<T: Collection>(&mut self, item: T) -> AgendaResult<()> {
        let mut items = T::slot(&self.collections).clone();

        match items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => tracing::debug!(kind = %T::KIND, id = item.id(), "Update of unknown id ignored"),
        }

        self.save(items)
    }

    fn remove<T: Collection>(&mut self, id: &str) -> AgendaResult<()> {
        let mut items = T::slot(&self.collections).clone();
        let before = items.len();
        items.retain(|item| item.id() != id);

        if items.len() < before {
            tracing::info!(kind = %T::KIND, id, "Deleted item");
        } else {
            tracing::debug!(kind = %T::KIND, id, "Delete of unknown id ignored");
        }

        self.save(items)
    }

    /// Apply `f` to the item with `id` and persist. Unknown ids are `NotFound`.
    fn modify<T: Collection>(&mut self, id: &str, f: impl FnOnce(&mut T)) -> AgendaResult<()> {
        let mut items = T::slot(&self.collections).clone();

        let item = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| AgendaError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        f(item);

        self.save(items)
    }

    fn toggle_favorite_in<T: Collection>(&mut self, id: &str) -> AgendaResult<bool> {
        let mut favorite = false;
        self.modify::<T>(id, |item| {
            favorite = !item.is_favorite();
            item.set_favorite(favorite);
        })?;
        Ok(favorite)
    }
}
