//! Recording a guest's response.

use std::fmt;
use std::str::FromStr;

use crate::error::{RsvpError, RsvpResult};
use crate::event::{Event, GuestStatus};
use crate::store::Store;

/// What a guest can answer. Going back to `pending` is not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Confirmed,
    Declined,
}

impl From<Response> for GuestStatus {
    fn from(response: Response) -> Self {
        match response {
            Response::Confirmed => GuestStatus::Confirmed,
            Response::Declined => GuestStatus::Declined,
        }
    }
}

impl FromStr for Response {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "confirm" | "confirmed" | "yes" => Ok(Response::Confirmed),
            "decline" | "declined" | "no" => Ok(Response::Declined),
            other => Err(RsvpError::Validation(format!(
                "Unknown response '{}' (expected confirm or decline)",
                other
            ))),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", GuestStatus::from(*self))
    }
}

impl Event {
    /// Copy of this event with the first guest matching `guest_email` set to
    /// `response`. An unknown email leaves the guest list as it was.
    pub fn with_rsvp(&self, guest_email: &str, response: Response) -> Event {
        let mut event = self.clone();
        event.record_rsvp(guest_email, response);
        event
    }

    /// In-place version of [`Event::with_rsvp`]. Returns whether a guest
    /// matched.
    pub fn record_rsvp(&mut self, guest_email: &str, response: Response) -> bool {
        match self.guests.iter_mut().find(|g| g.email == guest_email) {
            Some(guest) => {
                guest.status = response.into();
                true
            }
            None => false,
        }
    }
}

/// Record `response` for `guest_email` on the stored event and return the
/// event as persisted.
///
/// Answering for an email that is not on the guest list succeeds and
/// changes nothing on the guest list.
pub fn apply_rsvp(
    store: &Store,
    event_id: &str,
    guest_email: &str,
    response: Response,
) -> RsvpResult<Event> {
    let saved = store
        .modify_event(event_id, |event| {
            if !event.record_rsvp(guest_email, response) {
                tracing::debug!(event_id, guest_email, "RSVP for email not on guest list");
            }
        })?
        .ok_or_else(|| RsvpError::EventNotFound(event_id.to_string()))?;

    tracing::info!(
        event_id,
        %response,
        confirmed = saved.confirmed_guests(),
        "Recorded RSVP"
    );
    Ok(saved)
}
