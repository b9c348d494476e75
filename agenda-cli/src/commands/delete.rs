use agenda_core::{ItemKind, ItemStore, Persistence};
use anyhow::Result;

use crate::commands::edit::not_found;
use crate::render::Render;

pub fn run<P: Persistence>(store: &mut ItemStore<P>, kind: ItemKind, id: &str) -> Result<()> {
    if store.get(kind, id).is_none() {
        return Err(not_found(kind, id).into());
    }

    let notice = match kind {
        ItemKind::Event => store.delete_event(id)?,
        ItemKind::Task => store.delete_task(id)?,
        ItemKind::Birthday => store.delete_birthday(id)?,
    };

    println!("{}", notice.render());
    Ok(())
}
