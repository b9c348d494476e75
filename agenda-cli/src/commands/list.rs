use agenda_core::{ItemFilter, ItemStore, Persistence};
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::{Render, format_date_label};

pub fn run<P: Persistence>(
    store: &mut ItemStore<P>,
    filter: ItemFilter,
    favorites: bool,
) -> Result<()> {
    let today = store.now().date();

    let items = if favorites {
        store.favorites()
    } else {
        store.set_filters(filter);
        store.items()
    };

    if items.is_empty() {
        println!("{}", "No items found".dimmed());
        return Ok(());
    }

    // Group items by day and print
    let mut current_date = None;

    for item in &items {
        let date = item.anchor().date();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date, today).bold());
            current_date = Some(date);
        }

        println!("  {}", item.render());
    }

    Ok(())
}
