//! One-shot exports of an event snapshot: guest table, printable report,
//! calendar invite. None of these touch the store.

pub mod csv;
pub mod ics;
pub mod report;

use std::fmt;
use std::str::FromStr;

use crate::error::{RsvpError, RsvpResult};
use crate::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
    Ics,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "txt",
            ExportFormat::Ics => "ics",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "report" | "txt" | "pdf" => Ok(ExportFormat::Report),
            "ics" | "ical" | "calendar" => Ok(ExportFormat::Ics),
            other => Err(RsvpError::Validation(format!(
                "Unknown export format '{}' (expected csv, report or ics)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Report => write!(f, "report"),
            ExportFormat::Ics => write!(f, "ics"),
        }
    }
}

/// Run the adapter for `format`. `base_url` is only used by the calendar
/// invite.
pub fn export(event: &Event, format: ExportFormat, base_url: &str) -> RsvpResult<String> {
    match format {
        ExportFormat::Csv => csv::guests_csv(event),
        ExportFormat::Report => report::report(event).map(|r| r.render()),
        ExportFormat::Ics => ics::invite_ics(event, base_url),
    }
}

/// `<title>-guests.csv`, `<title>-report.txt`, `<title>.ics`
pub fn suggested_file_name(event: &Event, format: ExportFormat) -> String {
    let stem = file_stem(&event.title);
    match format {
        ExportFormat::Csv => format!("{}-guests.csv", stem),
        ExportFormat::Report => format!("{}-report.txt", stem),
        ExportFormat::Ics => format!("{}.ics", stem),
    }
}

/// Keep the title readable but safe to use as a file name.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        "event".to_string()
    } else {
        stem
    }
}
