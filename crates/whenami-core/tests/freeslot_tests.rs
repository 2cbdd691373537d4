//! Tests for free-slot derivation: hour-filtered bounds, the minimum-duration
//! cutoff, and per-day application across multi-day windows.

use chrono::{NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use whenami_core::freeslots::{day_bounds, derive_free};
use whenami_core::merge::merge_intervals;
use whenami_core::{BusyInterval, HoursFilter, MidDayBreak, TimeRange};

fn utc(d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, d, h, mi, 0).unwrap()
}

fn busy(ranges: &[(TimeRange, &str)]) -> Vec<BusyInterval> {
    merge_intervals(
        ranges
            .iter()
            .map(|(range, title)| BusyInterval {
                range: *range,
                contributors: vec![title.to_string()],
            })
            .collect(),
    )
}

fn clock(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn full_day(d: u32) -> TimeRange {
    TimeRange::new(utc(d, 0, 0), utc(d + 1, 0, 0))
}

#[test]
fn no_busy_time_yields_the_whole_bound() {
    let free = derive_free(&[], &[full_day(1)], None, Tz::UTC, 0);
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].range, full_day(1));
}

#[test]
fn gaps_before_between_and_after_busy_intervals() {
    let busy = busy(&[
        (TimeRange::new(utc(1, 10, 0), utc(1, 11, 0)), "A"),
        (TimeRange::new(utc(1, 14, 0), utc(1, 15, 0)), "B"),
    ]);
    let hours = HoursFilter::new(clock(8, 0), clock(17, 0));

    let free = derive_free(&busy, &[full_day(1)], Some(&hours), Tz::UTC, 0);

    let ranges: Vec<TimeRange> = free.iter().map(|s| s.range).collect();
    assert_eq!(
        ranges,
        vec![
            TimeRange::new(utc(1, 8, 0), utc(1, 10, 0)),
            TimeRange::new(utc(1, 11, 0), utc(1, 14, 0)),
            TimeRange::new(utc(1, 15, 0), utc(1, 17, 0)),
        ]
    );
}

#[test]
fn fully_covered_bound_yields_no_slots() {
    let busy = busy(&[(TimeRange::new(utc(1, 0, 0), utc(2, 0, 0)), "Wall")]);
    let hours = HoursFilter::new(clock(9, 0), clock(17, 0));

    let free = derive_free(&busy, &[full_day(1)], Some(&hours), Tz::UTC, 0);
    assert!(free.is_empty(), "no free time is a valid result, not an error");
}

#[test]
fn minimum_duration_scenario() {
    // Bound 09:00-17:00; busy [09:00,09:05) and [16:58,17:00); cutoff 30 min.
    // Exactly one slot survives: [09:05,16:58), 473 minutes.
    let busy = busy(&[
        (TimeRange::new(utc(1, 9, 0), utc(1, 9, 5)), "Triage"),
        (TimeRange::new(utc(1, 16, 58), utc(1, 17, 0)), "Wrap-up"),
    ]);
    let hours = HoursFilter::new(clock(9, 0), clock(17, 0));

    let free = derive_free(&busy, &[full_day(1)], Some(&hours), Tz::UTC, 30);

    assert_eq!(free.len(), 1);
    assert_eq!(free[0].range, TimeRange::new(utc(1, 9, 5), utc(1, 16, 58)));
    assert_eq!(free[0].range.duration_minutes(), 473);
}

#[test]
fn short_gaps_are_dropped_not_rejoined() {
    // Two 10-minute gaps around a tiny busy interval stay two drops; they
    // never fuse into one 20-minute slot across the busy time.
    let busy = busy(&[(TimeRange::new(utc(1, 9, 10), utc(1, 9, 20)), "Blip")]);
    let hours = HoursFilter::new(clock(9, 0), clock(9, 30));

    let free = derive_free(&busy, &[full_day(1)], Some(&hours), Tz::UTC, 15);
    assert!(free.is_empty());
}

#[test]
fn busy_intervals_are_clipped_at_bound_edges() {
    let busy = busy(&[(TimeRange::new(utc(1, 7, 0), utc(1, 9, 30)), "Commute")]);
    let hours = HoursFilter::new(clock(9, 0), clock(17, 0));

    let free = derive_free(&busy, &[full_day(1)], Some(&hours), Tz::UTC, 0);
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].range, TimeRange::new(utc(1, 9, 30), utc(1, 17, 0)));
}

#[test]
fn hours_filter_applies_per_calendar_day_across_multi_day_windows() {
    let busy = busy(&[(TimeRange::new(utc(2, 9, 0), utc(2, 17, 0)), "Offsite")]);
    let hours = HoursFilter::new(clock(9, 0), clock(17, 0));
    let days = [full_day(2), full_day(3)];

    let free = derive_free(&busy, &days, Some(&hours), Tz::UTC, 0);

    // Day one is fully booked; day two contributes its own 09:00-17:00 window.
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].range, TimeRange::new(utc(3, 9, 0), utc(3, 17, 0)));
}

#[test]
fn mid_day_break_splits_each_day_bound() {
    let hours = HoursFilter {
        start: clock(9, 0),
        end: clock(17, 0),
        mid_day_break: Some(MidDayBreak {
            start: clock(12, 0),
            end: clock(13, 0),
        }),
    };

    let free = derive_free(&[], &[full_day(1)], Some(&hours), Tz::UTC, 0);

    let ranges: Vec<TimeRange> = free.iter().map(|s| s.range).collect();
    assert_eq!(
        ranges,
        vec![
            TimeRange::new(utc(1, 9, 0), utc(1, 12, 0)),
            TimeRange::new(utc(1, 13, 0), utc(1, 17, 0)),
        ]
    );
}

#[test]
fn hours_filter_is_evaluated_in_the_filter_timezone() {
    // 09:00-17:00 in Sao Paulo (UTC-3) is 12:00-20:00 UTC.
    let hours = HoursFilter::new(clock(9, 0), clock(17, 0));
    let bounds = day_bounds(&full_day(1), Some(&hours), Tz::America__Sao_Paulo);

    assert_eq!(bounds.len(), 1);
    assert_eq!(bounds[0], TimeRange::new(utc(1, 12, 0), utc(1, 20, 0)));
}

#[test]
fn day_bounds_without_filter_return_the_bucket_unchanged() {
    let day = full_day(1);
    assert_eq!(day_bounds(&day, None, Tz::UTC), vec![day]);
}
