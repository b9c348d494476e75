use agenda_core::{ItemKind, ItemStore, Persistence};
use anyhow::Result;

use crate::render::Render;

pub fn run<P: Persistence>(store: &mut ItemStore<P>, kind: ItemKind, id: &str) -> Result<()> {
    let notice = store.toggle_favorite(kind, id)?;
    println!("{}", notice.render());
    Ok(())
}
