//! Calendar invite (.ics) for an event.

use chrono::Duration;
use icalendar::{Calendar, Component, EventLike};

use crate::error::{RsvpError, RsvpResult};
use crate::event::{Event, EventTime};
use crate::invite;

/// Events carry no end time; invites assume this long.
pub const DEFAULT_DURATION_HOURS: i64 = 2;

/// Generate a single-event calendar with a link back to the event page.
pub fn invite_ics(event: &Event, base_url: &str) -> RsvpResult<String> {
    let start = event
        .start_time()
        .map_err(|_| RsvpError::IcsExport(format!("Invalid event date '{}'", event.date)))?;
    let end = start.plus(Duration::hours(DEFAULT_DURATION_HOURS));

    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.id);
    ics_event.summary(&event.title);

    // DTSTAMP is required; use creation time so output is deterministic
    let dtstamp = event.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    ics_event.add_property("DTSTART", format_minutes(&start));
    ics_event.add_property("DTEND", format_minutes(&end));

    if !event.description.is_empty() {
        ics_event.description(&event.description);
    }
    if !event.location.is_empty() {
        ics_event.location(&event.location);
    }

    ics_event.add_property("URL", invite::event_url(base_url, &event.id));

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Year/month/day/hour/minute with seconds pinned to zero.
fn format_minutes(time: &EventTime) -> String {
    match time {
        EventTime::DateTimeUtc(dt) => dt.format("%Y%m%dT%H%M00Z").to_string(),
        EventTime::DateTimeFloating(dt) => dt.format("%Y%m%dT%H%M00").to_string(),
    }
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:RSVP\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
