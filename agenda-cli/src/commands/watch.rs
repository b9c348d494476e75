use agenda_core::{AgendaConfig, LogNotifier, Notifier, ReminderScheduler};
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::notifier::DesktopNotifier;

pub async fn run(config: &AgendaConfig) -> Result<()> {
    if config.desktop_notifications {
        watch(config, DesktopNotifier::new(config.notification_sound.clone())).await
    } else {
        watch(config, LogNotifier).await
    }
}

async fn watch<N: Notifier>(config: &AgendaConfig, notifier: N) -> Result<()> {
    let mut store = config.open_store()?;
    let mut scheduler = ReminderScheduler::new(notifier)
        .with_interval(config.reminder_interval())
        .reload_before_tick(true);

    println!(
        "{}",
        format!(
            "Watching {} for reminders every {}s (Ctrl-C to stop)",
            config.data_path().display(),
            scheduler.interval().as_secs()
        )
        .dimmed()
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    scheduler.run(&mut store, shutdown).await;
    Ok(())
}
