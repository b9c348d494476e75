//! Desktop delivery of reminders.

use agenda_core::{AgendaError, AgendaResult, Notifier, ReminderNotification};
use notify_rust::Notification;
use owo_colors::OwoColorize;

/// Shows reminders as desktop notifications and echoes them, with a
/// terminal bell, to stdout.
pub struct DesktopNotifier {
    sound: String,
}

impl DesktopNotifier {
    pub fn new(sound: impl Into<String>) -> Self {
        DesktopNotifier {
            sound: sound.into(),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, notification: &ReminderNotification) -> AgendaResult<()> {
        println!(
            "\x07{} {}  {}",
            notification.summary().bold(),
            notification.body(),
            notification.anchor.format("%Y-%m-%d %H:%M").dimmed()
        );

        Notification::new()
            .appname("agenda")
            .summary(notification.summary())
            .body(&notification.body())
            .sound_name(&self.sound)
            .show()
            .map_err(|e| AgendaError::Notification(e.to_string()))?;

        Ok(())
    }
}
