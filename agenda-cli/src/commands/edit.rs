//! Field-level edits of existing items. Only the flags given are changed.

use agenda_core::{
    AgendaError, Audience, Category, EventType, ItemKind, ItemStore, Persistence, Priority,
    TaskStatus,
};
use anyhow::Result;
use clap::Args;

use crate::commands::new::cost;
use crate::input::{parse_date, parse_datetime};
use crate::render::Render;

pub(crate) fn not_found(kind: ItemKind, id: &str) -> AgendaError {
    AgendaError::NotFound {
        kind,
        id: id.to_string(),
    }
}

#[derive(Args)]
pub struct EditEventArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub start: Option<String>,

    #[arg(long = "type")]
    pub event_type: Option<EventType>,

    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long)]
    pub audience: Option<Audience>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    /// New ticket price; 0 makes the event free
    #[arg(long)]
    pub price: Option<f64>,
}

#[derive(Args)]
pub struct EditTaskArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub due: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub status: Option<TaskStatus>,
}

#[derive(Args)]
pub struct EditBirthdayArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn event<P: Persistence>(store: &mut ItemStore<P>, args: EditEventArgs) -> Result<()> {
    let mut event = store
        .event(&args.id)
        .cloned()
        .ok_or_else(|| not_found(ItemKind::Event, &args.id))?;

    if let Some(title) = args.title {
        event.title = title;
    }
    if let Some(start) = args.start {
        event.datetime = parse_datetime(&start)?;
    }
    if let Some(event_type) = args.event_type {
        event.event_type = event_type;
    }
    if let Some(category) = args.category {
        event.category = category;
    }
    if let Some(audience) = args.audience {
        event.target_audience = audience;
    }
    if let Some(description) = args.description {
        event.description = description;
    }
    if let Some(location) = args.location {
        event.location = location;
    }
    if args.price.is_some() {
        event.cost = cost(args.price);
    }

    let notice = store.update_event(event)?;
    println!("{}", notice.render());
    Ok(())
}

pub fn task<P: Persistence>(store: &mut ItemStore<P>, args: EditTaskArgs) -> Result<()> {
    let mut task = store
        .task(&args.id)
        .cloned()
        .ok_or_else(|| not_found(ItemKind::Task, &args.id))?;

    if let Some(title) = args.title {
        task.title = title;
    }
    if let Some(due) = args.due {
        task.due_date = parse_datetime(&due)?;
    }
    if let Some(description) = args.description {
        task.description = description;
    }
    if let Some(priority) = args.priority {
        task.priority = priority;
    }
    if let Some(status) = args.status {
        task.status = status;
    }

    let notice = store.update_task(task)?;
    println!("{}", notice.render());
    Ok(())
}

pub fn birthday<P: Persistence>(store: &mut ItemStore<P>, args: EditBirthdayArgs) -> Result<()> {
    let mut birthday = store
        .birthday(&args.id)
        .cloned()
        .ok_or_else(|| not_found(ItemKind::Birthday, &args.id))?;

    if let Some(name) = args.name {
        birthday.name = name;
    }
    if let Some(date) = args.date {
        birthday.birth_date = parse_date(&date)?;
    }
    if let Some(description) = args.description {
        birthday.description = (!description.is_empty()).then_some(description);
    }

    let notice = store.update_birthday(birthday)?;
    println!("{}", notice.render());
    Ok(())
}
