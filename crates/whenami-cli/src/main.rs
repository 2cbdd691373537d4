//! `whenami` CLI — when am I free?
//!
//! ## Usage
//!
//! ```sh
//! # Free and busy slots for today
//! whenami --events events.json
//!
//! # Free slots tomorrow, work hours only
//! whenami --events events.json --tomorrow --work-hours --free
//!
//! # Busy slots for a date range, with event names, in another timezone
//! whenami --events events.json --date-range 01/06/2025,07/06/2025 \
//!     --busy --event-name --convert-tz America/Sao_Paulo
//!
//! # List available timezones
//! whenami --list-tz
//! ```
//!
//! The events file is JSON with one entry per calendar (id, name, native
//! timezone, and its fetched events); producing it — OAuth, pagination,
//! recurring-event expansion — is the fetch layer's job, not this binary's.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use whenami_core::{
    compute_availability, parse_timezone, CalendarSource, DateSelector, HoursChoice, OutputMode,
    Query,
};

mod config;
mod render;

#[derive(Parser)]
#[command(name = "whenami", version, about = "Find free slots in your calendars")]
struct Cli {
    /// Show slots for today (the default)
    #[arg(long, group = "when")]
    today: bool,
    /// Show slots for tomorrow
    #[arg(long, group = "when")]
    tomorrow: bool,
    /// Show slots for the seven days starting at the next week start
    #[arg(long, group = "when")]
    next_week: bool,
    /// Show slots for the next two weeks
    #[arg(long, group = "when")]
    next_two_weeks: bool,
    /// Show slots for a single date (DD/MM/YYYY, DD-MM-YYYY, DD/MM/YY, DD-MM-YY)
    #[arg(long, group = "when", value_name = "DATE")]
    date: Option<String>,
    /// Show slots for a date range "START,END", both endpoints inclusive
    #[arg(long, group = "when", value_name = "START,END")]
    date_range: Option<String>,

    /// Show only work hours (default 09:00-17:00)
    #[arg(long, group = "hours")]
    work_hours: bool,
    /// Show only personal hours (default 08:00-22:00); this is the default filter
    #[arg(long, group = "hours")]
    personal_hours: bool,
    /// Show all hours, 24/7 (disables time filters)
    #[arg(long, group = "hours")]
    all_hours: bool,

    /// Show only Monday-Friday slots
    #[arg(long)]
    work_days: bool,

    /// Show only free slots
    #[arg(long, group = "slots")]
    free: bool,
    /// Show only busy slots
    #[arg(long, group = "slots")]
    busy: bool,
    /// Split busy and free slots into separate sections (the default layout)
    #[arg(long)]
    split: bool,

    /// Show event names alongside busy slots
    #[arg(long)]
    event_name: bool,

    /// Convert output to the given timezone (e.g. America/Sao_Paulo)
    #[arg(long, value_name = "TZ")]
    convert_tz: Option<String>,
    /// List all available timezones and exit
    #[arg(long)]
    list_tz: bool,

    /// Fetched events file (JSON), one entry per calendar
    #[arg(long, value_name = "FILE", required_unless_present = "list_tz")]
    events: Option<PathBuf>,
    /// Config file (defaults to ~/.config/whenami/config.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn selector(&self) -> Result<DateSelector> {
        if self.tomorrow {
            return Ok(DateSelector::Tomorrow);
        }
        if self.next_week {
            return Ok(DateSelector::NextWeek);
        }
        if self.next_two_weeks {
            return Ok(DateSelector::NextTwoWeeks);
        }
        if let Some(date) = &self.date {
            return Ok(DateSelector::Date(date.clone()));
        }
        if let Some(range) = &self.date_range {
            let (start, end) = range.split_once(',').with_context(|| {
                format!("Invalid date range '{range}' (expected \"START,END\")")
            })?;
            return Ok(DateSelector::DateRange(start.to_string(), end.to_string()));
        }
        Ok(DateSelector::Today)
    }

    fn hours(&self) -> HoursChoice {
        if self.all_hours {
            HoursChoice::All
        } else if self.work_hours {
            HoursChoice::Work
        } else {
            HoursChoice::Personal
        }
    }

    fn mode(&self) -> OutputMode {
        if self.free {
            OutputMode::Free
        } else if self.busy {
            OutputMode::Busy
        } else {
            OutputMode::BothSplit
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_tz {
        for tz in chrono_tz::TZ_VARIANTS {
            println!("{}", tz.name());
        }
        return Ok(());
    }

    let file_config = config::load(cli.config.as_deref())?;
    let engine_config = config::to_engine_config(&file_config)?;

    let query = Query {
        selector: cli.selector()?,
        hours: cli.hours(),
        mode: cli.mode(),
        show_event_names: cli.event_name,
        work_days_only: cli.work_days,
        output_timezone: cli
            .convert_tz
            .as_deref()
            .map(parse_timezone)
            .transpose()?,
    };

    let calendars = load_calendars(&cli)?;
    let report = compute_availability(&calendars, &query, &engine_config, chrono::Utc::now())?;

    for warning in &report.warnings {
        eprintln!("[WARNING] {warning}");
    }

    let color =
        !cli.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
    render::print_report(&report, query.mode, render::Style::new(color));
    Ok(())
}

fn load_calendars(cli: &Cli) -> Result<Vec<CalendarSource>> {
    // Clap guarantees --events is present when we get here.
    let path = cli.events.as_deref().context("--events is required")?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse events file: {}", path.display()))
}
