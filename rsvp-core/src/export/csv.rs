//! Guest list as comma-separated values.

use crate::error::{RsvpError, RsvpResult};
use crate::event::Event;

const HEADER: [&str; 3] = ["Email", "Status", "RSVP Date"];

/// `Email,Status,RSVP Date` followed by one row per guest, CRLF-terminated.
pub fn guests_csv(event: &Event) -> RsvpResult<String> {
    if event.guests.is_empty() {
        return Err(RsvpError::CsvExport(format!(
            "Event '{}' has no guests to export",
            event.title
        )));
    }

    let mut out = String::new();
    push_row(&mut out, &HEADER);

    for guest in &event.guests {
        let rsvp_date = guest.rsvp_date.as_deref().unwrap_or("");
        push_row(&mut out, &[guest.email.as_str(), guest.status.as_str(), rsvp_date]);
    }

    Ok(out)
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Quote fields containing separators, quotes or line breaks; double any
/// embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
