use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::validate::parse_email_list;
use rsvp_core::{EventDraft, NewEvent};

use super::Context;

pub fn run(
    ctx: &Context,
    title: String,
    date: String,
    location: String,
    description: String,
    guests: &str,
) -> Result<()> {
    let user = ctx.session.require_user()?;

    let draft = EventDraft {
        title,
        date,
        location,
        description,
        guest_emails: parse_email_list(guests),
    };

    // Validation happens here, before anything is written
    let new_event = NewEvent::from_draft(draft, &user.id)?;
    let event = ctx.store().create_event(new_event)?;

    println!("{}", format!("  Created: {}", event.title).green());
    println!("  {} guest(s) invited", event.total_invited);
    println!("  {}", format!("id: {}", event.id).dimmed());
    println!("\n  Send links with `rsvp invite {}`", event.id);

    Ok(())
}
