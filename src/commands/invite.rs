use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::invite::{InvitationKind, event_url, invitations};

use super::Context;
use crate::render::Render;

pub fn run(ctx: &Context, id: &str, reminder: bool) -> Result<()> {
    let event = ctx.event(id)?;
    let kind = if reminder {
        InvitationKind::Reminder
    } else {
        InvitationKind::Invitation
    };

    let messages = invitations(&event, ctx.config.base_url(), kind);

    if messages.is_empty() {
        println!("{}", "  Everyone has already answered".dimmed());
        return Ok(());
    }

    println!("{}", messages[0].subject.bold());
    println!("{}\n", event_url(ctx.config.base_url(), &event.id).dimmed());

    for message in &messages {
        println!("{}", message.render());
    }

    Ok(())
}
