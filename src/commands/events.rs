use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::Event;
use rsvp_core::watch::watch_dashboard;

use super::{Context, watch_until_interrupted};
use crate::render::Render;

pub async fn run(ctx: &Context, watch: bool) -> Result<()> {
    let user = ctx.session.require_user()?;

    if !watch {
        draw(&ctx.store().events_by_host(&user.id));
        return Ok(());
    }

    let handle = watch_dashboard(ctx.store().clone(), &user.id, ctx.config.poll_interval());
    watch_until_interrupted(handle, |events: &Vec<Event>| draw(events)).await
}

fn draw(events: &[Event]) {
    println!("{}", "My Events".bold());

    if events.is_empty() {
        println!("{}", "  No events yet. Create one with `rsvp new`.".dimmed());
        return;
    }

    for event in events {
        println!();
        println!("{}", event.render());
    }
}
