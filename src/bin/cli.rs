use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use timetable::{
    Event, EventDraft, JsonFileStore, KeyValueStore, MemoryStore, SubmitError, Timetable,
    TimetableConfig, TimetableView, export_events_to_csv, export_events_to_json,
    import_events_from_csv, import_events_from_json,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Weekly timetable editor.
#[derive(Debug, Parser)]
#[command(name = "cli", about = "Weekly timetable editor", long_about = None)]
struct Cli {
    /// JSON grid configuration (gridStart, gridEnd, stepMinutes, days, storageKey).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// JSON file used as the key-value store.
    #[arg(short = 's', long = "store", default_value = "timetable.json")]
    store: PathBuf,

    /// SQLite database used as the key-value store instead of the JSON file.
    #[arg(long = "sqlite")]
    sqlite: Option<PathBuf>,

    /// Keep events in memory only.
    #[arg(long = "memory", default_value_t = false)]
    memory: bool,
}

fn open_store(cli: &Cli) -> Result<Box<dyn KeyValueStore>> {
    if cli.memory {
        info!("Using in-memory store");
        return Ok(Box::new(MemoryStore::new()));
    }
    if let Some(path) = &cli.sqlite {
        #[cfg(feature = "sqlite")]
        {
            info!("Using sqlite store at {}", path.display());
            let store = timetable::SqliteStore::new(path)
                .with_context(|| format!("Cannot open sqlite store: {}", path.display()))?;
            return Ok(Box::new(store));
        }
        #[cfg(not(feature = "sqlite"))]
        anyhow::bail!(
            "Rebuild with the `sqlite` feature to use {} as a store.",
            path.display()
        );
    }
    info!("Using JSON file store at {}", cli.store.display());
    Ok(Box::new(JsonFileStore::new(&cli.store)))
}

fn print_help() {
    println!(
        "Commands:\n  help                         Show this help\n  show                         Show the weekly grid\n  list                         List events with their ids\n  add                          Open the new event dialog ('cancel' closes it)\n  delete <id>                  Delete an event (asks for confirmation)\n  clear                        Delete all events (asks for confirmation)\n  config                       Show the grid configuration\n  export <json|csv> <path>     Write all events to a file\n  import <json|csv> <path>     Replace all events with the contents of a file\n  quit|exit                    Exit"
    );
}

fn print_config(config: &TimetableConfig) {
    println!("Grid start   : {}", config.grid_start);
    println!("Grid end     : {}", config.grid_end);
    println!("Step minutes : {}", config.step_minutes);
    println!("Days         : {}", config.days);
    println!("Storage key  : {}", config.storage_key);
}

fn describe_event(event: &Event) -> String {
    let weekday = event
        .weekday()
        .map(|wd| wd.to_string())
        .unwrap_or_else(|| format!("day {}", event.day));
    let mut line = format!(
        "{}  {} {}  {}",
        event.id,
        weekday,
        event.time_range(),
        event.title
    );
    if let Some(location) = &event.location {
        line.push_str(&format!("  @ {location}"));
    }
    if let Some(note) = &event.note {
        line.push_str(&format!("  ({note})"));
    }
    line
}

fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events.");
        return;
    }
    for event in events {
        println!("{}", describe_event(event));
    }
}

fn show<S: KeyValueStore>(timetable: &Timetable<S>, view: &mut TimetableView) {
    match timetable.refresh_view(view) {
        Ok(()) => println!("{}", view.render_text()),
        Err(e) => println!("Error loading events: {}", e),
    }
}

/// Prints `label` and reads one trimmed line. `None` on end of input.
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt_field<R: BufRead>(input: &mut R, label: &str) -> Option<String> {
    prompt(input, label).filter(|value| !value.eq_ignore_ascii_case("cancel"))
}

fn confirm<R: BufRead>(input: &mut R, question: &str) -> bool {
    prompt(input, &format!("{question} [y/N] "))
        .map(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false)
}

fn read_draft<R: BufRead>(input: &mut R, days: u8) -> Option<EventDraft> {
    let title = prompt_field(input, "Title: ")?;
    let day = prompt_field(input, &format!("Day (1-{days}): "))?;
    let start = prompt_field(input, "Start (HH:MM): ")?;
    let end = prompt_field(input, "End (HH:MM): ")?;
    let location = prompt_field(input, "Location (optional): ")?;
    let note = prompt_field(input, "Note (optional): ")?;
    Some(
        EventDraft::new(title, day, start, end)
            .with_location(location)
            .with_note(note),
    )
}

/// Runs the new event dialog until an event is saved or the user cancels.
/// Invalid input keeps the dialog open.
fn run_add_dialog<R: BufRead, S: KeyValueStore>(
    input: &mut R,
    timetable: &Timetable<S>,
) -> Option<Event> {
    println!("New event (type 'cancel' at any prompt to close the dialog)");
    loop {
        let Some(draft) = read_draft(input, timetable.config().days) else {
            println!("Dialog closed.");
            return None;
        };
        match timetable.submit(&draft) {
            Ok(event) => return Some(event),
            Err(SubmitError::Input(e)) => println!("Error: {}", e),
            Err(e) => {
                error!("Failed to save event: {e}");
                println!("Error: {}", e);
                return None;
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TimetableConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => TimetableConfig::default(),
    };
    let store = open_store(&cli)?;
    let timetable = Timetable::new(config, store).context("Invalid timetable configuration")?;
    let mut view = timetable.empty_view();

    println!("Timetable (CLI) - type 'help' for commands\n");
    show(&timetable, &mut view);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let Some(line) = prompt(&mut input, "> ") else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => show(&timetable, &mut view),
            "list" => match timetable.events() {
                Ok(events) => print_events(&events),
                Err(e) => println!("Error loading events: {}", e),
            },
            "config" => print_config(timetable.config()),
            "add" => {
                if let Some(event) = run_add_dialog(&mut input, &timetable) {
                    println!("Added event {}.", event.id);
                    show(&timetable, &mut view);
                }
            }
            "delete" => {
                let Some(id) = parts.next() else {
                    println!("Usage: delete <id>");
                    continue;
                };
                let event = match timetable.find_event(id) {
                    Ok(Some(event)) => event,
                    Ok(None) => {
                        println!("Event {id} not found.");
                        continue;
                    }
                    Err(e) => {
                        println!("Error loading events: {}", e);
                        continue;
                    }
                };
                if !confirm(&mut input, &format!("Delete event '{}'?", event.title)) {
                    println!("Kept event {id}.");
                    continue;
                }
                match timetable.delete_event(id) {
                    Ok(true) => {
                        println!("Deleted event {id}.");
                        show(&timetable, &mut view);
                    }
                    Ok(false) => println!("Event {id} not found."),
                    Err(e) => println!("Error deleting event: {}", e),
                }
            }
            "clear" => {
                if !confirm(&mut input, "Delete all events?") {
                    println!("Nothing cleared.");
                    continue;
                }
                match timetable.clear_all() {
                    Ok(()) => {
                        println!("All events cleared.");
                        show(&timetable, &mut view);
                    }
                    Err(e) => println!("Error clearing events: {}", e),
                }
            }
            "export" => {
                let fmt = parts.next();
                let path = parts.next();
                let (Some(fmt), Some(path)) = (fmt, path) else {
                    println!("Usage: export <json|csv> <path>");
                    continue;
                };
                let events = match timetable.events() {
                    Ok(events) => events,
                    Err(e) => {
                        println!("Error loading events: {}", e);
                        continue;
                    }
                };
                let res = match fmt {
                    "json" => export_events_to_json(&events, path),
                    "csv" => export_events_to_csv(&events, path),
                    _ => {
                        println!("Unknown format '{fmt}' (use json or csv)");
                        continue;
                    }
                };
                match res {
                    Ok(()) => println!("Exported {} event(s) to {}", events.len(), path),
                    Err(e) => println!("Export error: {}", e),
                }
            }
            "import" => {
                let fmt = parts.next();
                let path = parts.next();
                let (Some(fmt), Some(path)) = (fmt, path) else {
                    println!("Usage: import <json|csv> <path>");
                    continue;
                };
                let res = match fmt {
                    "json" => import_events_from_json(path),
                    "csv" => import_events_from_csv(path),
                    _ => {
                        println!("Unknown format '{fmt}' (use json or csv)");
                        continue;
                    }
                };
                match res.and_then(|events| {
                    let count = events.len();
                    timetable.replace_events(events).map(|_| count)
                }) {
                    Ok(count) => {
                        println!("Imported {count} event(s) from {path}");
                        show(&timetable, &mut view);
                    }
                    Err(e) => println!("Import error: {}", e),
                }
            }
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }

    Ok(())
}
