//! TimeWindow resolution — turns a date selector plus a reference "now" into
//! a concrete UTC range and per-day buckets.
//!
//! Day boundaries (midnight) are always computed in the resolver's timezone,
//! never in UTC, so users east or west of UTC get the calendar day they asked
//! for. The resolver is a pure function of its inputs: fixing `reference_now`
//! fixes the result.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{AvailabilityError, Result};
use crate::types::{DateSelector, TimeRange};

/// A resolved query window: the overall UTC range plus one bucket per
/// calendar day, so output can be grouped and hour-filtered per day.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    pub range: TimeRange,
    pub days: Vec<TimeRange>,
}

/// Resolve a date selector against a reference instant.
///
/// `work_days_only` drops Saturday/Sunday buckets; the overall `range` still
/// reflects the full span that was asked for.
///
/// # Errors
/// `InvalidDateFormat` when a literal date matches no accepted pattern,
/// `InvalidRange` when a range's end precedes its start.
pub fn resolve(
    selector: &DateSelector,
    reference_now: DateTime<Utc>,
    tz: Tz,
    week_start: Weekday,
    work_days_only: bool,
) -> Result<TimeWindow> {
    let local_today = reference_now.with_timezone(&tz).date_naive();

    let dates: Vec<NaiveDate> = match selector {
        DateSelector::Today => consecutive_days(local_today, 1),
        DateSelector::Tomorrow => consecutive_days(local_today + Duration::days(1), 1),
        DateSelector::NextWeek => {
            consecutive_days(next_occurrence(local_today, week_start), 7)
        }
        DateSelector::NextTwoWeeks => consecutive_days(local_today, 14),
        DateSelector::Date(raw) => consecutive_days(parse_flexible_date(raw)?, 1),
        DateSelector::DateRange(raw_start, raw_end) => {
            let start = parse_flexible_date(raw_start)?;
            let end = parse_flexible_date(raw_end)?;
            if end < start {
                return Err(AvailabilityError::InvalidRange {
                    start: raw_start.trim().to_string(),
                    end: raw_end.trim().to_string(),
                });
            }
            // Both endpoints inclusive.
            let len = (end - start).num_days() as usize + 1;
            consecutive_days(start, len)
        }
    };

    // The overall range covers every requested day, before any weekday filter.
    let range = TimeRange::new(
        local_midnight(tz, dates[0]),
        local_midnight(tz, dates[dates.len() - 1] + Duration::days(1)),
    );

    let days = dates
        .into_iter()
        .filter(|d| !work_days_only || is_workday(*d))
        .map(|d| day_bucket(tz, d))
        .collect();

    Ok(TimeWindow { range, days })
}

fn consecutive_days(start: NaiveDate, len: usize) -> Vec<NaiveDate> {
    start.iter_days().take(len).collect()
}

fn is_workday(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() < 5
}

/// The next strictly-future occurrence of `week_start` (7 days ahead when
/// today already is that weekday, matching "next week" rather than "this week").
fn next_occurrence(today: NaiveDate, week_start: Weekday) -> NaiveDate {
    let today_idx = today.weekday().num_days_from_monday();
    let start_idx = week_start.num_days_from_monday();
    let ahead = (start_idx + 7 - today_idx - 1) % 7 + 1;
    today + Duration::days(i64::from(ahead))
}

/// One calendar day in `tz` as a UTC range. On DST-transition days the bucket
/// is 23 or 25 hours long — that is the correct local day, not a bug.
fn day_bucket(tz: Tz, date: NaiveDate) -> TimeRange {
    TimeRange::new(
        local_midnight(tz, date),
        local_midnight(tz, date + Duration::days(1)),
    )
}

pub(crate) fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    local_instant(tz, date.and_time(NaiveTime::MIN))
}

/// Convert a local wall-clock datetime in `tz` to UTC.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times that
/// do not exist (DST spring-forward gap, including midnight itself in zones
/// that skip it) resolve to the first valid instant after the gap.
pub(crate) fn local_instant(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    let mut probe = naive;
    loop {
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return dt.with_timezone(&Utc);
        }
        // DST gaps are at most a handful of hours; step through in
        // 15-minute increments until we land past the transition.
        probe += Duration::minutes(15);
    }
}

/// Parse a literal date in any of the accepted formats:
/// `DD/MM/YYYY`, `DD-MM-YYYY`, `DD/MM/YY`, `DD-MM-YY`.
pub fn parse_flexible_date(raw: &str) -> Result<NaiveDate> {
    let cleaned = raw.trim().replace('/', "-");
    NaiveDate::parse_from_str(&cleaned, "%d-%m-%y")
        .or_else(|_| NaiveDate::parse_from_str(&cleaned, "%d-%m-%Y"))
        .map_err(|_| AvailabilityError::InvalidDateFormat(raw.trim().to_string()))
}
