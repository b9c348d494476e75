mod commands;
mod input;
mod notifier;
mod render;

use agenda_core::{AgendaConfig, Category, EventType, ItemFilter, ItemKind};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Organize cultural events, tasks and birthdays, and get reminded about them")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming items, grouped by day
    List {
        /// Case-insensitive text to look for in titles and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Only events in this category (e.g. "film" or "Cine y medios audiovisual")
        #[arg(long)]
        category: Option<Category>,

        /// Only events of this type (e.g. "workshop" or "Taller")
        #[arg(long = "type")]
        event_type: Option<EventType>,

        /// Date prefix (YYYY-MM-DD, or YYYY-MM for a whole month)
        #[arg(short, long)]
        date: Option<String>,

        /// Show favorites only (other filters are ignored)
        #[arg(short, long)]
        favorites: bool,
    },
    /// Add an event, optionally recurring
    Event(commands::new::EventArgs),
    /// Add a task
    Task(commands::new::TaskArgs),
    /// Add a birthday
    Birthday(commands::new::BirthdayArgs),
    /// Change fields of an existing event
    EditEvent(commands::edit::EditEventArgs),
    /// Change fields of an existing task
    EditTask(commands::edit::EditTaskArgs),
    /// Change fields of an existing birthday
    EditBirthday(commands::edit::EditBirthdayArgs),
    /// Delete an item
    Delete { kind: ItemKind, id: String },
    /// Toggle an item's favorite flag
    Favorite { kind: ItemKind, id: String },
    /// Set (or re-arm) a reminder on an item
    Remind {
        kind: ItemKind,
        id: String,

        /// How long before the item to fire (e.g. "15m", "1h", "1day")
        #[arg(short, long)]
        before: String,
    },
    /// Run the reminder scheduler until interrupted
    Watch,
    /// Show configuration paths and values
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AgendaConfig::load()?;

    match cli.command {
        Commands::List {
            search,
            category,
            event_type,
            date,
            favorites,
        } => {
            let filter = ItemFilter {
                search: search.unwrap_or_default(),
                category,
                event_type,
                date,
            };
            commands::list::run(&mut config.open_store()?, filter, favorites)
        }
        Commands::Event(args) => commands::new::event(&mut config.open_store()?, args),
        Commands::Task(args) => commands::new::task(&mut config.open_store()?, args),
        Commands::Birthday(args) => commands::new::birthday(&mut config.open_store()?, args),
        Commands::EditEvent(args) => commands::edit::event(&mut config.open_store()?, args),
        Commands::EditTask(args) => commands::edit::task(&mut config.open_store()?, args),
        Commands::EditBirthday(args) => commands::edit::birthday(&mut config.open_store()?, args),
        Commands::Delete { kind, id } => commands::delete::run(&mut config.open_store()?, kind, &id),
        Commands::Favorite { kind, id } => {
            commands::favorite::run(&mut config.open_store()?, kind, &id)
        }
        Commands::Remind { kind, id, before } => {
            commands::remind::run(&mut config.open_store()?, kind, &id, &before)
        }
        Commands::Watch => commands::watch::run(&config).await,
        Commands::Config => commands::config::run(&config),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
