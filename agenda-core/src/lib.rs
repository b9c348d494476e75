//! Core of the agenda cultural-events organizer.
//!
//! This crate holds everything except the command line:
//! - `item`: events, tasks and birthdays with their wire format
//! - `recurrence`: expanding a recurring event into concrete occurrences
//! - `store`: the item store with CRUD, favorites and reminders
//! - `filter`: search and filtering over the stored items
//! - `reminder`: the periodic reminder scheduler
//! - `persistence`: the key/value adapter the store writes through

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod item;
pub mod persistence;
pub mod recurrence;
pub mod reminder;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use crate::config::AgendaConfig;
pub use error::{AgendaError, AgendaResult};
pub use filter::ItemFilter;
pub use item::*;
pub use persistence::{FileStore, MemoryStore, Persistence};
pub use reminder::{LogNotifier, Notifier, ReminderNotification, ReminderScheduler};
pub use store::{Feedback, ItemStore, Notice};
