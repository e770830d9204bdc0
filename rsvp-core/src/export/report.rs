//! Printable event report laid out on A4 pages.
//!
//! Positions are millimetres from the top of the page. The first page has a
//! fixed layout (title, details, guest list, statistics); anything that would
//! run past the printable area continues on a new page with the same line
//! spacing.

use crate::error::{RsvpError, RsvpResult};
use crate::event::{Event, EventTime};

const TOP_MARGIN: u32 = 20;
/// Lowest usable position on an A4 page (297mm minus the bottom margin).
const PAGE_BOTTOM: u32 = 277;
const LINE_SPACING: u32 = 10;

const TITLE_SIZE: u8 = 20;
const BODY_SIZE: u8 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub y: u32,
    pub font_size: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub pages: Vec<Page>,
}

impl Report {
    /// Plain text, one row per line, blank rows for larger gaps, pages
    /// separated by a form feed.
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .map(render_page)
            .collect::<Vec<_>>()
            .join("\x0c\n")
    }
}

fn render_page(page: &Page) -> String {
    let mut out = String::new();
    let mut prev_y: Option<u32> = None;

    for line in &page.lines {
        if let Some(prev) = prev_y {
            let blank_rows = (line.y.saturating_sub(prev) / LINE_SPACING).saturating_sub(1);
            for _ in 0..blank_rows {
                out.push('\n');
            }
        }
        out.push_str(&line.text);
        out.push('\n');
        prev_y = Some(line.y);
    }

    out
}

/// Build the report for `event`. Fails if the event date can't be read.
pub fn report(event: &Event) -> RsvpResult<Report> {
    let start = event
        .start_time()
        .map_err(|_| RsvpError::ReportExport(format!("Invalid event date '{}'", event.date)))?;

    let stats = event.stats();
    let guest_count = event.guests.len() as u32;
    let guests_top = 85;
    let stats_top = guests_top + guest_count * LINE_SPACING + 20;

    let mut layout: Vec<(u32, u8, String)> = vec![
        (TOP_MARGIN, TITLE_SIZE, event.title.clone()),
        (35, BODY_SIZE, format!("Date: {}", format_date(&start))),
        (45, BODY_SIZE, format!("Location: {}", event.location)),
        (55, BODY_SIZE, format!("Description: {}", event.description)),
        (75, BODY_SIZE, "Guest List:".to_string()),
    ];

    layout.extend(event.guests.iter().enumerate().map(|(i, guest)| {
        (
            guests_top + i as u32 * LINE_SPACING,
            BODY_SIZE,
            format!("{} - {}", guest.email, guest.status),
        )
    }));

    layout.extend([
        (stats_top, BODY_SIZE, "Statistics:".to_string()),
        (stats_top + 10, BODY_SIZE, format!("Confirmed: {}", stats.confirmed)),
        (stats_top + 20, BODY_SIZE, format!("Declined: {}", stats.declined)),
        (stats_top + 30, BODY_SIZE, format!("Pending: {}", stats.pending)),
    ]);

    Ok(Report {
        pages: paginate(layout),
    })
}

/// Move lines past the printable area onto following pages, keeping their
/// relative spacing.
fn paginate(layout: Vec<(u32, u8, String)>) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut shift = 0;

    for (y, font_size, text) in layout {
        let mut page_y = y - shift;
        if page_y > PAGE_BOTTOM {
            pages.push(Page::default());
            shift = y - TOP_MARGIN;
            page_y = TOP_MARGIN;
        }

        if let Some(page) = pages.last_mut() {
            page.lines.push(ReportLine {
                y: page_y,
                font_size,
                text,
            });
        }
    }

    pages
}

/// e.g. `Thursday, March 20, 2025 at 03:00 PM`
pub fn format_date(time: &EventTime) -> String {
    const FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";
    match time {
        EventTime::DateTimeFloating(dt) => dt.format(FORMAT).to_string(),
        EventTime::DateTimeUtc(dt) => format!("{} UTC", dt.format(FORMAT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, NewEvent};
    use crate::rsvp::Response;

    fn event_with_guests(n: usize) -> Event {
        NewEvent::from_draft(
            EventDraft {
                title: "Offsite".into(),
                date: "2025-03-20T15:00".into(),
                location: "Lake house".into(),
                description: "Two days of planning".into(),
                guest_emails: (0..n).map(|i| format!("g{i}@x.com")).collect(),
            },
            "host",
        )
        .unwrap()
        .into_event("evt".into())
    }

    fn line<'a>(report: &'a Report, page: usize, prefix: &str) -> &'a ReportLine {
        report.pages[page]
            .lines
            .iter()
            .find(|l| l.text.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {prefix:?} on page {page}"))
    }

    #[test]
    fn test_first_page_layout() {
        let event = event_with_guests(2)
            .with_rsvp("g0@x.com", Response::Confirmed)
            .with_rsvp("g1@x.com", Response::Declined);
        let report = report(&event).unwrap();

        assert_eq!(report.pages.len(), 1);
        assert_eq!(line(&report, 0, "Offsite").y, 20);
        assert_eq!(line(&report, 0, "Offsite").font_size, 20);
        assert_eq!(
            line(&report, 0, "Date:").text,
            "Date: Thursday, March 20, 2025 at 03:00 PM"
        );
        assert_eq!(line(&report, 0, "Guest List:").y, 75);
        assert_eq!(line(&report, 0, "g0@x.com").text, "g0@x.com - confirmed");
        assert_eq!(line(&report, 0, "g1@x.com").y, 95);
        assert_eq!(line(&report, 0, "Statistics:").y, 125);
        assert_eq!(line(&report, 0, "Confirmed:").text, "Confirmed: 1");
        assert_eq!(line(&report, 0, "Declined:").text, "Declined: 1");
        assert_eq!(line(&report, 0, "Pending:").y, 155);
    }

    #[test]
    fn test_long_guest_list_flows_onto_next_page() {
        let report = report(&event_with_guests(25)).unwrap();

        assert_eq!(report.pages.len(), 2);
        // 85 + 19*10 = 275 is the last guest that fits.
        assert_eq!(line(&report, 0, "g19@x.com").y, 275);
        assert_eq!(line(&report, 1, "g20@x.com").y, TOP_MARGIN);
        assert_eq!(line(&report, 1, "g24@x.com").y, TOP_MARGIN + 40);
        // Last guest at +40, then the usual 30mm gap before the statistics.
        assert_eq!(line(&report, 1, "Statistics:").y, TOP_MARGIN + 70);
        assert!(report.pages.iter().flat_map(|p| &p.lines).all(|l| l.y <= PAGE_BOTTOM));
    }

    #[test]
    fn test_render_separates_pages_with_form_feed() {
        let text = report(&event_with_guests(25)).unwrap().render();
        assert_eq!(text.matches('\x0c').count(), 1);
        assert!(text.starts_with("Offsite\nDate: "));
        assert!(text.contains("Description: Two days of planning\n\nGuest List:\n"));
    }

    #[test]
    fn test_malformed_date_is_a_report_error() {
        let mut event = event_with_guests(1);
        event.date = "someday".into();
        assert!(matches!(report(&event), Err(RsvpError::ReportExport(_))));
    }
}
