//! Config file loading — `~/.config/whenami/config.json` or an explicit path.
//!
//! Clock times are stored as `"HH:MM"` strings in the file and parsed here;
//! anything missing falls back to the engine defaults (work 09:00–17:00,
//! personal 08:00–22:00, 30-minute minimum slot, Monday week start).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use whenami_core::{parse_timezone, EngineConfig, HoursFilter, MidDayBreak};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub default_timezone: Option<String>,
    pub work_hours: Option<HoursSection>,
    pub personal_hours: Option<HoursSection>,
    pub minimum_slot_duration: Option<i64>,
    pub week_start: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HoursSection {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub mid_day_break: Option<BreakSection>,
}

#[derive(Debug, Deserialize)]
pub struct BreakSection {
    pub start: String,
    pub end: String,
}

/// Load the config file. A missing file is not an error — defaults apply.
pub fn load(path: Option<&Path>) -> Result<FileConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(FileConfig::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config/whenami/config.json"))
}

/// Turn the raw file config into a validated engine config.
pub fn to_engine_config(file: &FileConfig) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();

    if let Some(name) = &file.default_timezone {
        config.default_timezone = parse_timezone(name).context("In config: default_timezone")?;
    } else if let Ok(name) = std::env::var("TZ") {
        // No configured zone; honor the TZ environment variable when set.
        if let Ok(tz) = parse_timezone(&name) {
            config.default_timezone = tz;
        }
    }

    if let Some(section) = &file.work_hours {
        config.work_hours = parse_hours(section).context("In config: work_hours")?;
    }
    if let Some(section) = &file.personal_hours {
        config.personal_hours = parse_hours(section).context("In config: personal_hours")?;
    }
    if let Some(minutes) = file.minimum_slot_duration {
        anyhow::ensure!(
            minutes >= 0,
            "In config: minimum_slot_duration must not be negative"
        );
        config.minimum_slot_minutes = minutes;
    }
    if let Some(day) = &file.week_start {
        config.week_start = day
            .parse()
            .map_err(|_| anyhow::anyhow!("In config: invalid week_start '{day}'"))?;
    }

    Ok(config)
}

fn parse_hours(section: &HoursSection) -> Result<HoursFilter> {
    let mut filter = HoursFilter::new(parse_clock(&section.start)?, parse_clock(&section.end)?);
    if let Some(brk) = &section.mid_day_break {
        filter.mid_day_break = Some(MidDayBreak {
            start: parse_clock(&brk.start)?,
            end: parse_clock(&brk.end)?,
        });
    }
    Ok(filter)
}

fn parse_clock(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .with_context(|| format!("Invalid time '{raw}' (expected HH:MM)"))
}
