/// Durable record holding the events collection.
pub const EVENTS_KEY: &str = "cultural-events";
/// Durable record holding the tasks collection.
pub const TASKS_KEY: &str = "cultural-tasks";
/// Durable record holding the birthdays collection.
pub const BIRTHDAYS_KEY: &str = "cultural-birthdays";
/// Side-table mapping event id to its reminder.
pub const REMINDERS_KEY: &str = "event-reminders";
/// Side-table listing favorite event ids.
pub const FAVORITES_KEY: &str = "favorite-events";

/// Hard ceiling on occurrences produced by a single recurrence rule.
pub const MAX_OCCURRENCES: usize = 100;
/// Occurrences generated by a daily rule.
pub const DAILY_OCCURRENCES: u32 = 30;
/// Occurrences generated by an annual rule (one per year, base year included).
pub const ANNUAL_OCCURRENCES: u32 = 5;
/// Custom rules never expand further than this from the base date.
pub const CUSTOM_HORIZON_MONTHS: u32 = 12;

/// Default period between reminder checks.
pub const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;
