//! Terminal rendering for rsvp-core types.
//!
//! Extension traits that add colored output via owo_colors.

use owo_colors::OwoColorize;
use rsvp_core::export::report::format_date;
use rsvp_core::invite::Invitation;
use rsvp_core::{Event, Guest, GuestStats, GuestStatus};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for GuestStatus {
    fn render(&self) -> String {
        match self {
            GuestStatus::Confirmed => self.as_str().green().to_string(),
            GuestStatus::Declined => self.as_str().red().to_string(),
            GuestStatus::Pending => self.as_str().yellow().to_string(),
        }
    }
}

impl Render for Guest {
    fn render(&self) -> String {
        let symbol = match self.status {
            GuestStatus::Confirmed => "✓".green().to_string(),
            GuestStatus::Declined => "✗".red().to_string(),
            GuestStatus::Pending => "·".yellow().to_string(),
        };
        format!("{} {} {}", symbol, self.email, self.status.render())
    }
}

impl Render for GuestStats {
    fn render(&self) -> String {
        format!(
            "{} confirmed, {} declined, {} pending",
            self.confirmed.green(),
            self.declined.red(),
            self.pending.yellow()
        )
    }
}

/// One dashboard row.
impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{}\n   {}  {}\n   {} confirmed of {} invited  {}",
            self.title.bold(),
            display_date(self),
            self.location.dimmed(),
            self.confirmed_guests(),
            self.total_invited,
            format!("[{}]", self.id).dimmed()
        )
    }
}

impl Render for Invitation {
    fn render(&self) -> String {
        format!("{}\n   {}", self.guest_email, self.link.dimmed())
    }
}

/// Full event page: details, guests, statistics.
pub fn render_details(event: &Event) -> String {
    let mut lines = vec![
        format!("📅 {}", event.title.bold()),
        format!("   {}", display_date(event)),
        format!("   {}", event.location),
    ];

    if !event.description.is_empty() {
        lines.push(String::new());
        lines.push(format!("   {}", event.description));
    }

    lines.push(String::new());
    lines.push(format!(
        "   {} confirmed of {} invited",
        event.confirmed_guests(),
        event.total_invited
    ));

    for guest in &event.guests {
        lines.push(format!("   {}", guest.render()));
    }

    lines.push(String::new());
    lines.push(format!("   {}", event.stats().render()));
    lines.push(format!("   {}", format!("id: {}", event.id).dimmed()));

    lines.join("\n")
}

/// Human-friendly date, falling back to the raw string if it can't be read.
fn display_date(event: &Event) -> String {
    event
        .start_time()
        .map(|t| format_date(&t))
        .unwrap_or_else(|_| event.date.clone())
}
