//! Terminal rendering — bullet lists, section separators, colored totals.
//!
//! The engine hands over display records already converted to the output
//! timezone; this module only owns coloring and layout.

use whenami_core::{AvailabilityReport, DisplayRecord, OutputMode, SlotKind};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";

/// ANSI styling, disabled with `--no-color` or the `NO_COLOR` convention.
#[derive(Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn bold_green(&self, text: &str) -> String {
        self.paint(GREEN, &self.paint(BOLD, text))
    }

    fn bold_red(&self, text: &str) -> String {
        self.paint(RED, &self.paint(BOLD, text))
    }
}

/// Print the report: a busy section and/or a free section, each with a
/// separator sized to its longest line and a duration total underneath.
pub fn print_report(report: &AvailabilityReport, mode: OutputMode, style: Style) {
    println!(
        "\nWHENAMI {}/{}?",
        style.green("free"),
        style.red("busy")
    );

    if report.records.is_empty() {
        println!("No slots to display");
        return;
    }

    let busy: Vec<&DisplayRecord> = report
        .records
        .iter()
        .filter(|r| r.kind == SlotKind::Busy)
        .collect();
    let free: Vec<&DisplayRecord> = report
        .records
        .iter()
        .filter(|r| r.kind == SlotKind::Free)
        .collect();

    if mode != OutputMode::Free && !busy.is_empty() {
        println!("\n{} slots", style.red("Busy"));
        print_section(&busy, |line| style.red(line));
        println!(
            "Total {} time: {}",
            style.red("busy"),
            style.bold_red(&format_duration(report.total_busy_minutes))
        );
    }

    if mode != OutputMode::Busy && !free.is_empty() {
        println!("\n{} slots", style.green("Free"));
        print_section(&free, |line| style.green(line));
        println!(
            "Total {} time: {}",
            style.green("free"),
            style.bold_green(&format_duration(report.total_free_minutes))
        );
    }
}

fn print_section(records: &[&DisplayRecord], paint: impl Fn(&str) -> String) {
    let lines: Vec<String> = records.iter().map(|r| record_line(r)).collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let separator: String = "─".repeat(width);

    println!("{separator}");
    for line in &lines {
        println!("{}", paint(line));
    }
    println!("{separator}");
}

fn record_line(record: &DisplayRecord) -> String {
    let slot = format!(
        "• {} to {}",
        record.start.format("%Y-%m-%d %H:%M %Z"),
        record.end.format("%Y-%m-%d %H:%M %Z")
    );
    match &record.label {
        Some(label) => format!("{slot} - {label}"),
        None => slot,
    }
}

fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;
    let plural = if hours == 1 { "" } else { "s" };
    if hours == 0 {
        format!("{minutes} minutes")
    } else if minutes == 0 {
        format!("{hours} hour{plural}")
    } else {
        format!("{hours} hour{plural} {minutes} minutes")
    }
}
