//! End-to-end tests for the full availability pipeline.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use whenami_core::{
    compute_availability, AvailabilityError, CalendarSource, DateSelector, EngineConfig,
    EventTime, HoursChoice, OutputMode, Query, SlotKind, SourceEvent,
};

fn utc(d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, d, h, mi, 0).unwrap()
}

fn timed(title: &str, start: &str, end: &str) -> SourceEvent {
    SourceEvent {
        title: title.to_string(),
        start: EventTime::Timed(start.parse().unwrap()),
        end: EventTime::Timed(end.parse().unwrap()),
    }
}

/// Work calendar in New York plus a personal calendar in London, both with
/// events on June 1, 2025.
fn cross_timezone_calendars() -> Vec<CalendarSource> {
    vec![
        CalendarSource {
            id: "work@example.com".to_string(),
            name: "Work".to_string(),
            timezone: "America/New_York".to_string(),
            events: vec![timed(
                "Project sync",
                "2025-06-01T14:00:00-04:00",
                "2025-06-01T15:00:00-04:00",
            )],
        },
        CalendarSource {
            id: "personal@example.com".to_string(),
            name: "Personal".to_string(),
            timezone: "Europe/London".to_string(),
            events: vec![timed(
                "Evening call",
                "2025-06-01T19:30:00+01:00",
                "2025-06-01T20:00:00+01:00",
            )],
        },
    ]
}

#[test]
fn cross_timezone_events_merge_into_one_busy_block() {
    let query = Query {
        selector: DateSelector::Date("01/06/2025".to_string()),
        hours: HoursChoice::All,
        show_event_names: true,
        ..Query::default()
    };
    let report = compute_availability(
        &cross_timezone_calendars(),
        &query,
        &EngineConfig::default(),
        utc(1, 12, 0),
    )
    .unwrap();

    // 18:00-19:00 and 18:30-19:00 UTC collapse into one interval.
    let busy: Vec<_> = report
        .records
        .iter()
        .filter(|r| r.kind == SlotKind::Busy)
        .collect();
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].start.with_timezone(&Utc), utc(1, 18, 0));
    assert_eq!(busy[0].end.with_timezone(&Utc), utc(1, 19, 0));
    assert_eq!(busy[0].label.as_deref(), Some("Project sync, Evening call"));
    assert_eq!(report.total_busy_minutes, 60);

    // All-hours complement of one busy hour in a 24-hour day.
    let free: Vec<_> = report
        .records
        .iter()
        .filter(|r| r.kind == SlotKind::Free)
        .collect();
    assert_eq!(free.len(), 2);
    assert_eq!(report.total_free_minutes, 23 * 60);
}

#[test]
fn busy_detection_ignores_the_hours_filter() {
    // The busy hour (18:00-19:00 UTC) falls outside work hours, but the
    // filter only bounds free-slot search — busy totals still see it.
    let query = Query {
        selector: DateSelector::Date("01/06/2025".to_string()),
        hours: HoursChoice::Work,
        ..Query::default()
    };
    let report = compute_availability(
        &cross_timezone_calendars(),
        &query,
        &EngineConfig::default(),
        utc(1, 12, 0),
    )
    .unwrap();

    assert_eq!(report.total_busy_minutes, 60);
    // Work hours 09:00-17:00 UTC are untouched by the 18:00 busy block.
    assert_eq!(report.total_free_minutes, 8 * 60);
}

#[test]
fn warnings_surface_without_aborting_the_run() {
    let mut calendars = cross_timezone_calendars();
    calendars[0].events.push(timed(
        "Broken",
        "2025-06-01T15:00:00-04:00",
        "2025-06-01T14:00:00-04:00",
    ));

    let query = Query {
        selector: DateSelector::Date("01/06/2025".to_string()),
        hours: HoursChoice::All,
        ..Query::default()
    };
    let report =
        compute_availability(&calendars, &query, &EngineConfig::default(), utc(1, 12, 0)).unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("Broken"));
    assert_eq!(report.total_busy_minutes, 60, "good events still counted");
}

#[test]
fn invalid_date_aborts_before_touching_any_calendar() {
    let query = Query {
        selector: DateSelector::Date("not-a-date".to_string()),
        ..Query::default()
    };
    let err = compute_availability(
        &cross_timezone_calendars(),
        &query,
        &EngineConfig::default(),
        utc(1, 12, 0),
    )
    .unwrap_err();

    assert!(matches!(err, AvailabilityError::InvalidDateFormat(_)));
}

#[test]
fn no_calendars_means_fully_free() {
    let query = Query {
        selector: DateSelector::Date("01/06/2025".to_string()),
        hours: HoursChoice::All,
        mode: OutputMode::Free,
        ..Query::default()
    };
    let report =
        compute_availability(&[], &query, &EngineConfig::default(), utc(1, 12, 0)).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.total_free_minutes, 24 * 60);
    assert_eq!(report.total_busy_minutes, 0);
}

#[test]
fn output_timezone_governs_the_hours_filter_and_the_records() {
    // Free search bounded by 09:00-17:00 *Sao Paulo* time (12:00-20:00 UTC);
    // the merged busy hour 18:00-19:00 UTC now splits that window.
    let query = Query {
        selector: DateSelector::Date("01/06/2025".to_string()),
        hours: HoursChoice::Work,
        mode: OutputMode::Free,
        output_timezone: Some(Tz::America__Sao_Paulo),
        ..Query::default()
    };
    let report = compute_availability(
        &cross_timezone_calendars(),
        &query,
        &EngineConfig::default(),
        utc(1, 12, 0),
    )
    .unwrap();

    let starts: Vec<_> = report
        .records
        .iter()
        .map(|r| r.start.with_timezone(&Utc))
        .collect();
    assert_eq!(starts, vec![utc(1, 12, 0), utc(1, 19, 0)]);
    assert_eq!(report.total_free_minutes, 6 * 60 + 60);
}

#[test]
fn fully_booked_day_reports_no_free_slots() {
    let calendars = vec![CalendarSource {
        id: "work".to_string(),
        name: "Work".to_string(),
        timezone: "UTC".to_string(),
        events: vec![timed("Wall", "2025-06-01T00:00:00Z", "2025-06-02T00:00:00Z")],
    }];
    let query = Query {
        selector: DateSelector::Date("01/06/2025".to_string()),
        hours: HoursChoice::All,
        mode: OutputMode::Free,
        ..Query::default()
    };
    let report =
        compute_availability(&calendars, &query, &EngineConfig::default(), utc(1, 12, 0)).unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.total_free_minutes, 0);
    assert_eq!(report.total_busy_minutes, 24 * 60);
}
