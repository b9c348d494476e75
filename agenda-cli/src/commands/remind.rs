use agenda_core::{ItemKind, ItemStore, Persistence};
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::input::parse_lead_minutes;
use crate::render::Render;

pub fn run<P: Persistence>(
    store: &mut ItemStore<P>,
    kind: ItemKind,
    id: &str,
    before: &str,
) -> Result<()> {
    let minutes_before = parse_lead_minutes(before)?;
    let notice = store.toggle_reminder(kind, id, minutes_before)?;

    println!("{}", notice.render());

    if let Some(item) = store.get(kind, id) {
        let fires_at = item.anchor() - chrono::Duration::minutes(i64::from(minutes_before));
        println!(
            "{}",
            format!("  Fires at {} while `agenda watch` runs", fires_at.format("%Y-%m-%d %H:%M"))
                .dimmed()
        );
    }

    Ok(())
}
