use agenda_core::{
    Audience, BirthdayDraft, Category, Cost, EventDraft, EventType, ItemStore, Persistence,
    Priority, Recurrence, RecurrenceType, Reminder, TaskDraft, TaskStatus,
};
use anyhow::Result;
use clap::Args;

use crate::input::{parse_date, parse_datetime, parse_lead_minutes};
use crate::render::Render;

#[derive(Args)]
pub struct EventArgs {
    pub title: String,

    /// When it starts (e.g. "2030-03-20T15:00" or "next friday 6pm")
    #[arg(short, long)]
    pub start: String,

    /// Activity type (workshop, festival, exhibition, takeover, gathering, screening, other)
    #[arg(long = "type", default_value = "other")]
    pub event_type: EventType,

    /// Cultural area (performing-arts, visual-arts, film, books, heritage)
    #[arg(long, default_value = "performing-arts")]
    pub category: Category,

    /// Target audience (children, adults, everyone)
    #[arg(long, default_value = "everyone")]
    pub audience: Audience,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(long)]
    pub map_link: Option<String>,

    /// Name of the person in charge
    #[arg(long)]
    pub responsible: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub social: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    /// Ticket price; the event is free when omitted
    #[arg(long)]
    pub price: Option<f64>,

    /// Recurrence (once, daily, annual, custom)
    #[arg(long, default_value = "once")]
    pub repeat: RecurrenceType,

    /// Weekdays for a custom recurrence, comma separated (e.g. "monday,wednesday")
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<String>,

    /// Last date of a custom recurrence
    #[arg(long)]
    pub until: Option<String>,

    /// Maximum number of occurrences for a custom recurrence
    #[arg(long)]
    pub count: Option<u32>,

    /// Arm a reminder this long before each occurrence (e.g. "30m")
    #[arg(long)]
    pub remind: Option<String>,

    #[arg(long)]
    pub favorite: bool,
}

impl EventArgs {
    fn into_draft(self) -> Result<EventDraft> {
        let mut draft = EventDraft::new(self.title, parse_datetime(&self.start)?);

        draft.event_type = self.event_type;
        draft.category = self.category;
        draft.target_audience = self.audience;
        draft.description = self.description.unwrap_or_default();
        draft.location = self.location.unwrap_or_default();
        draft.map_link = self.map_link;
        draft.responsible_name = self.responsible.unwrap_or_default();
        draft.phone = self.phone.unwrap_or_default();
        draft.social_media = self.social.unwrap_or_default();
        draft.image = self.image;
        draft.cost = cost(self.price);
        draft.recurrence = recurrence(self.repeat, self.days, self.until.as_deref(), self.count)?;
        draft.reminder = reminder(self.remind.as_deref())?;
        draft.is_favorite = self.favorite;

        Ok(draft)
    }
}

#[derive(Args)]
pub struct TaskArgs {
    pub title: String,

    /// When it is due (e.g. "2030-03-20T15:00" or "tomorrow 9am")
    #[arg(long)]
    pub due: String,

    #[arg(short, long)]
    pub description: Option<String>,

    /// high, medium or low
    #[arg(short, long, default_value = "medium")]
    pub priority: Priority,

    /// pending, in-progress or completed
    #[arg(long, default_value = "pending")]
    pub status: TaskStatus,

    /// Arm a reminder this long before the due date (e.g. "1h")
    #[arg(long)]
    pub remind: Option<String>,

    #[arg(long)]
    pub favorite: bool,
}

#[derive(Args)]
pub struct BirthdayArgs {
    pub name: String,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub favorite: bool,
}

pub fn event<P: Persistence>(store: &mut ItemStore<P>, args: EventArgs) -> Result<()> {
    let notice = store.add_event(args.into_draft()?)?;
    println!("{}", notice.render());
    Ok(())
}

pub fn task<P: Persistence>(store: &mut ItemStore<P>, args: TaskArgs) -> Result<()> {
    let mut draft = TaskDraft::new(args.title, parse_datetime(&args.due)?);
    draft.description = args.description.unwrap_or_default();
    draft.priority = args.priority;
    draft.status = args.status;
    draft.reminder = reminder(args.remind.as_deref())?;
    draft.is_favorite = args.favorite;

    let notice = store.add_task(draft)?;
    println!("{}", notice.render());
    Ok(())
}

pub fn birthday<P: Persistence>(store: &mut ItemStore<P>, args: BirthdayArgs) -> Result<()> {
    let mut draft = BirthdayDraft::new(args.name, parse_date(&args.date)?);
    draft.description = args.description;
    draft.is_favorite = args.favorite;

    let notice = store.add_birthday(draft)?;
    println!("{}", notice.render());
    Ok(())
}

pub(crate) fn cost(price: Option<f64>) -> Cost {
    match price {
        Some(amount) if amount > 0.0 => Cost {
            is_free: false,
            amount: Some(amount),
        },
        _ => Cost::free(),
    }
}

fn reminder(lead: Option<&str>) -> Result<Option<Reminder>> {
    lead.map(|lead| parse_lead_minutes(lead).map(Reminder::armed))
        .transpose()
}

/// Build a recurrence from command-line flags. Weekdays, end date and count
/// only apply to custom recurrences.
fn recurrence(
    kind: RecurrenceType,
    days: Vec<String>,
    until: Option<&str>,
    count: Option<u32>,
) -> Result<Recurrence> {
    if kind != RecurrenceType::Custom {
        if !days.is_empty() || until.is_some() || count.is_some() {
            anyhow::bail!("--days, --until and --count require --repeat custom");
        }
        return Ok(Recurrence::simple(kind));
    }

    let mut recurrence = Recurrence::simple(RecurrenceType::Custom);
    recurrence.days_of_week = (!days.is_empty()).then_some(days);
    recurrence.end_date = until.map(parse_date).transpose()?;
    recurrence.occurrences = count;
    Ok(recurrence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn simple_recurrence_rejects_custom_flags() {
        assert!(recurrence(RecurrenceType::Daily, vec!["lunes".into()], None, None).is_err());
        assert_eq!(
            recurrence(RecurrenceType::Annual, Vec::new(), None, None).unwrap(),
            Recurrence::simple(RecurrenceType::Annual)
        );
    }

    #[test]
    fn custom_recurrence_from_flags() {
        let recurrence = recurrence(
            RecurrenceType::Custom,
            vec!["monday".into(), "miércoles".into()],
            Some("2030-06-01"),
            Some(10),
        )
        .unwrap();

        assert_eq!(recurrence.kind, RecurrenceType::Custom);
        assert_eq!(
            recurrence.days_of_week,
            Some(vec!["monday".to_string(), "miércoles".to_string()])
        );
        assert_eq!(recurrence.end_date, NaiveDate::from_ymd_opt(2030, 6, 1));
        assert_eq!(recurrence.occurrences, Some(10));
    }

    #[test]
    fn price_sets_cost() {
        assert_eq!(cost(None), Cost::free());
        assert_eq!(cost(Some(0.0)), Cost::free());
        assert_eq!(
            cost(Some(150.0)),
            Cost {
                is_free: false,
                amount: Some(150.0)
            }
        );
    }

    #[test]
    fn reminder_flag_arms_reminder() {
        assert_eq!(reminder(Some("30m")).unwrap(), Some(Reminder::armed(30)));
        assert_eq!(reminder(None).unwrap(), None);
    }
}
