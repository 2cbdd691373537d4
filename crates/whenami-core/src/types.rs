//! Core data model: instants, ranges, source events, and query configuration.
//!
//! Every instant is stored as `DateTime<Utc>`. Timezones only appear at the
//! boundaries: a calendar's native zone when normalizing raw events, and the
//! output zone when formatting the final report. No stage consults an ambient
//! clock or locale — the reference "now" and every zone are explicit parameters.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// A half-open interval of absolute time, `[start, end)`.
///
/// Invariant: `start <= end`. A zero-length range is valid and denotes no time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start <= end, "TimeRange start must not exceed end");
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Strict half-open overlap: back-to-back ranges `[9,10)` and `[10,11)`
    /// do NOT overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The intersection of two ranges, or `None` when they share no time.
    pub fn intersect(&self, other: &TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then(|| TimeRange::new(start, end))
    }
}

/// A raw event timestamp as delivered by the fetch collaborator.
///
/// Timed events carry their own offset (the upstream API supplies
/// timezone-aware timestamps); all-day events carry only a local date and are
/// anchored to the calendar's native zone during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Timed(DateTime<FixedOffset>),
    AllDay(NaiveDate),
}

/// A single raw calendar event. Read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEvent {
    #[serde(default)]
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// One calendar's worth of fetched events plus its native timezone.
///
/// The fetch collaborator owns OAuth, pagination, and recurring-event
/// expansion; the engine only sees the completed list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub timezone: String,
    #[serde(default)]
    pub events: Vec<SourceEvent>,
}

impl CalendarSource {
    /// Human-facing name, falling back to the id when no name was supplied.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A busy interval in UTC, with the titles of the source events that
/// contributed to it (retained only for event-name display).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusyInterval {
    pub range: TimeRange,
    /// Contributor titles in first-seen order. Unioned when intervals merge.
    pub contributors: Vec<String>,
}

/// A free slot derived from the complement of busy time within a bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreeSlot {
    pub range: TimeRange,
}

/// Mid-day break carved out of an hours window (e.g. a lunch block).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidDayBreak {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A local time-of-day window restricting free-slot search.
///
/// Interpreted in the output timezone when bounding free-slot computation.
/// Busy-interval detection always uses absolute UTC overlap — the filter only
/// decides whether a free slot is reported, never whether events conflict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursFilter {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub mid_day_break: Option<MidDayBreak>,
}

impl HoursFilter {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            mid_day_break: None,
        }
    }
}

/// Which configured hours window applies to free-slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoursChoice {
    Work,
    #[default]
    Personal,
    All,
}

/// What the final report contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Free,
    Busy,
    /// Two ordered groups: busy first, then free.
    #[default]
    BothSplit,
}

/// The date (or date range) a query covers.
///
/// Literal dates are kept as raw strings and parsed by the window resolver,
/// which is where `InvalidDateFormat` / `InvalidRange` surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateSelector {
    #[default]
    Today,
    Tomorrow,
    NextWeek,
    NextTwoWeeks,
    Date(String),
    DateRange(String, String),
}

/// One query's immutable configuration. Nothing survives across invocations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub selector: DateSelector,
    pub hours: HoursChoice,
    pub mode: OutputMode,
    pub show_event_names: bool,
    /// Restrict day buckets to Monday–Friday.
    pub work_days_only: bool,
    /// Zone for the final report (and for evaluating the hours filter);
    /// defaults to the engine's configured default timezone.
    pub output_timezone: Option<Tz>,
}

/// Numeric configuration shared by every query.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub default_timezone: Tz,
    pub work_hours: HoursFilter,
    pub personal_hours: HoursFilter,
    pub minimum_slot_minutes: i64,
    pub week_start: Weekday,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timezone: Tz::UTC,
            work_hours: HoursFilter::new(naive_time(9, 0), naive_time(17, 0)),
            personal_hours: HoursFilter::new(naive_time(8, 0), naive_time(22, 0)),
            minimum_slot_minutes: 30,
            week_start: Weekday::Mon,
        }
    }
}

fn naive_time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}

/// Busy or free, for display records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Busy,
    Free,
}

/// One line of the final report, already converted to the output timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub kind: SlotKind,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub duration_minutes: i64,
    /// Comma-separated contributor titles, when event names were requested.
    pub label: Option<String>,
}

/// The full result of one availability query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityReport {
    /// The resolved query window in UTC.
    pub window: TimeRange,
    pub records: Vec<DisplayRecord>,
    pub total_busy_minutes: i64,
    pub total_free_minutes: i64,
    /// Non-fatal problems (malformed events, unknown calendar timezones).
    pub warnings: Vec<String>,
}

/// Resolve an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| AvailabilityError::InvalidTimezone(name.to_string()))
}
