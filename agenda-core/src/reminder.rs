//! Periodic reminder checks.
//!
//! Each tick scans every item with an armed, untriggered reminder and fires
//! those whose window `[anchor - minutes_before, anchor)` contains now. The
//! `triggered` flag is the only guard against double-firing, so it is set
//! and persisted right after the notification goes out.
//!
//! Windows are evaluated, not instants: a reminder whose window opened while
//! nothing was running still fires on the next tick, as long as the anchor
//! has not passed.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::time::MissedTickBehavior;

use crate::constants::DEFAULT_REMINDER_INTERVAL_SECS;
use crate::error::AgendaResult;
use crate::item::{ItemKind, ItemRef};
use crate::persistence::Persistence;
use crate::store::ItemStore;

/// A reminder that is due, ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    pub kind: ItemKind,
    pub item_id: String,
    pub title: String,
    pub anchor: NaiveDateTime,
    pub minutes_before: u32,
}

impl ReminderNotification {
    fn for_item(item: &ItemRef<'_>, minutes_before: u32) -> Self {
        ReminderNotification {
            kind: item.kind(),
            item_id: item.id().to_string(),
            title: item.title().to_string(),
            anchor: item.anchor(),
            minutes_before,
        }
    }

    pub fn summary(&self) -> &'static str {
        "Reminder"
    }

    pub fn body(&self) -> String {
        match self.kind {
            ItemKind::Event => format!("Event: \"{}\"", self.title),
            ItemKind::Task => format!("Task: \"{}\"", self.title),
            ItemKind::Birthday => format!("Birthday of \"{}\"", self.title),
        }
    }
}

/// Delivers reminder notifications to the user (and plays the alert).
pub trait Notifier {
    fn notify(&mut self, notification: &ReminderNotification) -> AgendaResult<()>;
}

/// Writes reminders to the log instead of the desktop.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: &ReminderNotification) -> AgendaResult<()> {
        tracing::info!(
            kind = %notification.kind,
            id = %notification.item_id,
            at = %notification.anchor,
            "{}: {}",
            notification.summary(),
            notification.body()
        );
        Ok(())
    }
}

pub struct ReminderScheduler<N: Notifier> {
    notifier: N,
    interval: Duration,
    reload_before_tick: bool,
}

impl<N: Notifier> ReminderScheduler<N> {
    pub fn new(notifier: N) -> Self {
        ReminderScheduler {
            notifier,
            interval: Duration::from_secs(DEFAULT_REMINDER_INTERVAL_SECS),
            reload_before_tick: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Re-read the durable store before every tick, so changes written by
    /// other processes are picked up at tick boundaries.
    pub fn reload_before_tick(mut self, reload: bool) -> Self {
        self.reload_before_tick = reload;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one check at the store's current time. Returns what fired.
    pub fn tick<P: Persistence>(&mut self, store: &mut ItemStore<P>) -> Vec<ReminderNotification> {
        let now = store.now();

        let due: Vec<ReminderNotification> = store
            .collections()
            .iter()
            .filter_map(|item| {
                let reminder = item.reminder()?;
                reminder
                    .is_due(item.anchor(), now)
                    .then(|| ReminderNotification::for_item(&item, reminder.minutes_before))
            })
            .collect();

        for notification in &due {
            tracing::info!(
                kind = %notification.kind,
                id = %notification.item_id,
                title = %notification.title,
                "Reminder fired"
            );

            // A failed delivery still counts as fired; retrying every tick
            // would spam the user once the notifier recovers.
            if let Err(e) = self.notifier.notify(notification) {
                tracing::warn!(id = %notification.item_id, error = %e, "Notification failed");
            }

            if let Err(e) = store.mark_triggered(notification.kind, &notification.item_id) {
                tracing::error!(id = %notification.item_id, error = %e, "Could not persist triggered reminder");
            }
        }

        due
    }

    /// Tick on a fixed interval until `shutdown` resolves. The first tick
    /// runs immediately.
    pub async fn run<P, F>(&mut self, store: &mut ItemStore<P>, shutdown: F)
    where
        P: Persistence,
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::debug!(interval = ?self.interval, "Reminder scheduler started");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    if self.reload_before_tick {
                        if let Err(e) = store.load() {
                            tracing::warn!(error = %e, "Skipping reminder check, reload failed");
                            continue;
                        }
                    }
                    self.tick(store);
                }
            }
        }

        tracing::debug!("Reminder scheduler stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::AgendaError;
    use crate::item::{BirthdayDraft, EventDraft, TaskDraft};
    use crate::persistence::MemoryStore;
    use chrono::{Duration as ChronoDuration, NaiveDate};

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Vec<ReminderNotification>,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, notification: &ReminderNotification) -> AgendaResult<()> {
            self.sent.push(notification.clone());
            if self.fail {
                return Err(AgendaError::Notification("no display".into()));
            }
            Ok(())
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    /// A store holding one event at 10:00 with a 10-minute reminder.
    fn store_with_event_reminder() -> (ItemStore<MemoryStore>, ManualClock, String) {
        let clock = ManualClock::new(start());
        let mut store = ItemStore::with_clock(MemoryStore::new(), clock.clone());

        let anchor = start() + ChronoDuration::hours(1);
        store
            .add_event(EventDraft::new("Concierto", anchor))
            .unwrap();
        let id = store.events()[0].id.clone();
        store.toggle_reminder(ItemKind::Event, &id, 10).unwrap();

        (store, clock, id)
    }

    #[test]
    fn fires_once_inside_window() {
        let (mut store, clock, id) = store_with_event_reminder();
        let mut scheduler = ReminderScheduler::new(RecordingNotifier::default());

        // anchor - 5 minutes
        clock.set(start() + ChronoDuration::minutes(55));

        let fired = scheduler.tick(&mut store);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].item_id, id);
        assert_eq!(fired[0].body(), "Event: \"Concierto\"");
        assert!(store.event(&id).unwrap().reminder.as_ref().unwrap().triggered);

        let fired_again = scheduler.tick(&mut store);
        assert!(fired_again.is_empty());
        assert_eq!(scheduler.notifier().sent.len(), 1);
    }

    #[test]
    fn does_not_fire_before_window() {
        let (mut store, clock, id) = store_with_event_reminder();
        let mut scheduler = ReminderScheduler::new(RecordingNotifier::default());

        clock.set(start() + ChronoDuration::minutes(49));

        assert!(scheduler.tick(&mut store).is_empty());
        assert!(!store.event(&id).unwrap().reminder.as_ref().unwrap().triggered);
    }

    #[test]
    fn triggered_flag_survives_reload() {
        let (mut store, clock, id) = store_with_event_reminder();
        let mut scheduler = ReminderScheduler::new(RecordingNotifier::default());

        clock.set(start() + ChronoDuration::minutes(55));
        scheduler.tick(&mut store);

        store.load().unwrap();
        assert!(store.event(&id).unwrap().reminder.as_ref().unwrap().triggered);
        assert!(scheduler.tick(&mut store).is_empty());
    }

    #[test]
    fn rearming_allows_firing_again() {
        let (mut store, clock, id) = store_with_event_reminder();
        let mut scheduler = ReminderScheduler::new(RecordingNotifier::default());

        clock.set(start() + ChronoDuration::minutes(55));
        assert_eq!(scheduler.tick(&mut store).len(), 1);

        store.toggle_reminder(ItemKind::Event, &id, 10).unwrap();
        assert_eq!(scheduler.tick(&mut store).len(), 1);
        assert_eq!(scheduler.notifier().sent.len(), 2);
    }

    #[test]
    fn checks_tasks_and_birthdays() {
        let clock = ManualClock::new(start());
        let mut store = ItemStore::with_clock(MemoryStore::new(), clock.clone());

        store
            .add_task(TaskDraft::new("Enviar afiche", start() + ChronoDuration::minutes(30)))
            .unwrap();
        let task_id = store.tasks()[0].id.clone();
        store.toggle_reminder(ItemKind::Task, &task_id, 60).unwrap();

        // Anchored at midnight of the birth date, which is tomorrow here
        store
            .add_birthday(BirthdayDraft::new(
                "Ana",
                NaiveDate::from_ymd_opt(2030, 6, 2).unwrap(),
            ))
            .unwrap();
        let birthday_id = store.birthdays()[0].id.clone();
        store
            .toggle_reminder(ItemKind::Birthday, &birthday_id, 24 * 60)
            .unwrap();

        let mut scheduler = ReminderScheduler::new(RecordingNotifier::default());
        let fired = scheduler.tick(&mut store);

        let bodies: Vec<_> = fired.iter().map(|n| n.body()).collect();
        assert_eq!(
            bodies,
            vec!["Task: \"Enviar afiche\"", "Birthday of \"Ana\""]
        );
        assert!(store.tasks()[0].reminder.as_ref().unwrap().triggered);
        assert!(store.birthdays()[0].reminder.as_ref().unwrap().triggered);
    }

    #[test]
    fn failed_delivery_still_marks_triggered() {
        let (mut store, clock, id) = store_with_event_reminder();
        let mut scheduler = ReminderScheduler::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });

        clock.set(start() + ChronoDuration::minutes(55));

        assert_eq!(scheduler.tick(&mut store).len(), 1);
        assert!(store.event(&id).unwrap().reminder.as_ref().unwrap().triggered);
    }

    #[test]
    fn log_notifier_accepts_notifications() {
        let notification = ReminderNotification {
            kind: ItemKind::Task,
            item_id: "t1".into(),
            title: "Enviar afiche".into(),
            anchor: start(),
            minutes_before: 5,
        };

        assert!(LogNotifier.notify(&notification).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_ticks_until_shutdown() {
        let (mut store, clock, _id) = store_with_event_reminder();
        clock.set(start() + ChronoDuration::minutes(55));

        let mut scheduler = ReminderScheduler::new(RecordingNotifier::default())
            .with_interval(Duration::from_secs(60));

        scheduler
            .run(&mut store, tokio::time::sleep(Duration::from_secs(150)))
            .await;

        // Three ticks ran (0s, 60s, 120s) but the reminder fired only once
        assert_eq!(scheduler.notifier().sent.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_can_reload_between_ticks() {
        let (mut store, clock, id) = store_with_event_reminder();
        clock.set(start() + ChronoDuration::minutes(55));

        let mut scheduler =
            ReminderScheduler::new(RecordingNotifier::default()).reload_before_tick(true);

        scheduler
            .run(&mut store, tokio::time::sleep(Duration::from_secs(90)))
            .await;

        assert_eq!(scheduler.notifier().sent.len(), 1);
        assert!(store.event(&id).unwrap().reminder.as_ref().unwrap().triggered);
    }
}
