//! Custom event commands.

use std::path::PathBuf;

use availability_core::events::InsertOutcome;
use availability_core::{CustomEvent, EventRegistry};
use chrono::Weekday;
use clap::Subcommand;

use super::{load_config, CmdResult};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add a custom event
    Add {
        /// Day of week (0-6 or sun/mon/tue/wed/thu/fri/sat)
        #[arg(long)]
        day: String,
        /// Start time (HH:MM)
        #[arg(long)]
        begin: String,
        /// End time (HH:MM), exclusive
        #[arg(long)]
        end: String,
        /// Workload level
        #[arg(long)]
        level: u32,
        /// Short label
        #[arg(long)]
        label: String,
        /// Tooltip message
        #[arg(long, default_value = "")]
        message: String,
        /// Overwrite an existing event with the same day and start time
        #[arg(long)]
        replace: bool,
    },
    /// List custom events
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the event starting at the given day and time
    Remove {
        #[arg(long)]
        day: String,
        #[arg(long)]
        begin: String,
    },
}

fn parse_day(day_str: &str) -> Result<Weekday, Box<dyn std::error::Error>> {
    let lower = day_str.to_lowercase();
    let day = match lower.as_str() {
        "0" | "sun" | "sunday" => Weekday::Sun,
        "1" | "mon" | "monday" => Weekday::Mon,
        "2" | "tue" | "tuesday" => Weekday::Tue,
        "3" | "wed" | "wednesday" => Weekday::Wed,
        "4" | "thu" | "thursday" => Weekday::Thu,
        "5" | "fri" | "friday" => Weekday::Fri,
        "6" | "sat" | "saturday" => Weekday::Sat,
        _ => {
            return Err(format!(
                "Invalid day: '{day_str}'. Use 0-6 or sun/mon/tue/wed/thu/fri/sat"
            )
            .into())
        }
    };
    Ok(day)
}

pub fn run(config_path: Option<PathBuf>, action: EventAction) -> CmdResult {
    let (path, mut config) = load_config(config_path)?;
    let mut registry = EventRegistry::from_events(std::mem::take(&mut config.custom_events));

    match action {
        EventAction::Add {
            day,
            begin,
            end,
            level,
            label,
            message,
            replace,
        } => {
            let event = CustomEvent::new(parse_day(&day)?, begin, end, level, label, message);
            event.validate()?;
            if config.catalog().get(level).is_none() {
                tracing::warn!(
                    level,
                    "event level is not in the catalog; it will render without a color"
                );
            }

            match registry.insert(event, replace) {
                InsertOutcome::Added => println!("event added"),
                InsertOutcome::Replaced(old) => {
                    println!("event replaced (was: {} level {})", old.label, old.level)
                }
                InsertOutcome::Exists(old) => {
                    return Err(format!(
                        "an event already starts at {} {} ({}); use --replace to overwrite",
                        old.day, old.begin, old.label
                    )
                    .into());
                }
            }
        }
        EventAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(registry.list())?);
            } else if registry.is_empty() {
                println!("no custom events");
            } else {
                for event in registry.list() {
                    println!(
                        "{} {}-{}  level {}  {}",
                        event.day, event.begin, event.end, event.level, event.label
                    );
                }
            }
            return Ok(());
        }
        EventAction::Remove { day, begin } => {
            let day = parse_day(&day)?;
            match registry.remove(day, &begin) {
                Some(removed) => println!("removed {}", removed.label),
                None => return Err(format!("no event starts at {day} {begin}").into()),
            }
        }
    }

    config.custom_events = registry.into_events();
    config.save_to(&path)?;
    Ok(())
}
