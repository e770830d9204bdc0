pub mod auth;
pub mod config;
pub mod events;
pub mod export;
pub mod invite;
pub mod new;
pub mod respond;
pub mod show;

use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::config::RsvpConfig;
use rsvp_core::watch::PollHandle;
use rsvp_core::{Event, RsvpError, Session, Store};

/// Everything a command needs: settings plus who is logged in.
pub struct Context {
    pub config: RsvpConfig,
    pub session: Session,
}

impl Context {
    pub fn store(&self) -> &Store {
        self.session.store()
    }

    /// Load an event or fail with a user-facing "not found".
    pub fn event(&self, id: &str) -> Result<Event> {
        self.store()
            .event(id)
            .ok_or_else(|| RsvpError::EventNotFound(id.to_string()).into())
    }
}

/// Redraw `draw` whenever the poller publishes a new snapshot, until Ctrl-C.
/// Returning drops the handle, which stops the poller.
pub async fn watch_until_interrupted<T, F>(mut handle: PollHandle<T>, draw: F) -> Result<()>
where
    T: Clone,
    F: Fn(&T),
{
    draw(&handle.current());
    println!("\n{}", "Watching for changes (Ctrl-C to stop)".dimmed());

    loop {
        tokio::select! {
            next = handle.changed() => match next {
                Some(snapshot) => {
                    // Clear screen and move cursor home
                    print!("\x1b[2J\x1b[H");
                    draw(&snapshot);
                    println!("\n{}", "Watching for changes (Ctrl-C to stop)".dimmed());
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
