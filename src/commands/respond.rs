use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::invite::decode_token;
use rsvp_core::{Response, apply_rsvp};

use super::Context;

pub fn run(ctx: &Context, id: &str, guest: &str, response: Response) -> Result<()> {
    // Anything without an @ is treated as an invitation-link token
    let email = if guest.contains('@') {
        guest.to_string()
    } else {
        decode_token(guest)?
    };

    let event = apply_rsvp(ctx.store(), id, &email, response)?;

    if event.guest(&email).is_none() {
        println!(
            "{}",
            format!("  {} is not on the guest list; nothing changed", email).yellow()
        );
    } else {
        println!("{}", format!("  RSVP {} for {}", response, email).green());
    }
    println!(
        "  {} confirmed of {} invited",
        event.confirmed_guests(),
        event.total_invited
    );

    Ok(())
}
