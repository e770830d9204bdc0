use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::Event;
use rsvp_core::watch::watch_event;

use super::{Context, watch_until_interrupted};
use crate::render::render_details;

pub async fn run(ctx: &Context, id: &str, watch: bool) -> Result<()> {
    if !watch {
        println!("{}", render_details(&ctx.event(id)?));
        return Ok(());
    }

    let handle = watch_event(ctx.store().clone(), id, ctx.config.poll_interval());
    if handle.current().is_none() {
        anyhow::bail!("Event '{}' not found", id);
    }

    watch_until_interrupted(handle, |event: &Option<Event>| match event {
        Some(event) => println!("{}", render_details(event)),
        None => println!("{}", "  Event not found".red()),
    })
    .await
}
