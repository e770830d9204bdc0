//! Invitation and reminder messages with per-guest RSVP links.
//!
//! Nothing is sent from here; callers decide what to do with the payloads.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::{RsvpError, RsvpResult};
use crate::event::{Event, GuestStatus};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationKind {
    Invitation,
    /// Only goes to guests who haven't answered.
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub kind: InvitationKind,
    pub guest_email: String,
    pub subject: String,
    pub link: String,
}

/// Canonical link to an event's page.
pub fn event_url(base_url: &str, event_id: &str) -> String {
    format!("{}/event/{}", base_url.trim_end_matches('/'), event_id)
}

/// `{base_url}/event/{id}/rsvp/{token}` where the token encodes the email.
pub fn rsvp_link(base_url: &str, event_id: &str, guest_email: &str) -> String {
    format!(
        "{}/rsvp/{}",
        event_url(base_url, event_id),
        encode_token(guest_email)
    )
}

pub fn encode_token(guest_email: &str) -> String {
    URL_SAFE_NO_PAD.encode(guest_email)
}

pub fn decode_token(token: &str) -> RsvpResult<String> {
    let invalid = || RsvpError::Validation(format!("Invalid RSVP token '{}'", token));

    let bytes = URL_SAFE_NO_PAD.decode(token.trim()).map_err(|_| invalid())?;
    let email = String::from_utf8(bytes).map_err(|_| invalid())?;

    if !validate::is_valid_email(&email) {
        return Err(invalid());
    }
    Ok(email)
}

/// One message per guest (reminders skip anyone who already answered).
pub fn invitations(event: &Event, base_url: &str, kind: InvitationKind) -> Vec<Invitation> {
    let subject = match kind {
        InvitationKind::Invitation => format!("You're invited: {}", event.title),
        InvitationKind::Reminder => format!("Reminder: {}", event.title),
    };

    let messages: Vec<Invitation> = event
        .guests
        .iter()
        .filter(|g| kind == InvitationKind::Invitation || g.status == GuestStatus::Pending)
        .map(|guest| Invitation {
            kind,
            guest_email: guest.email.clone(),
            subject: subject.clone(),
            link: rsvp_link(base_url, &event.id, &guest.email),
        })
        .collect();

    tracing::info!(
        event_id = %event.id,
        count = messages.len(),
        ?kind,
        "Prepared invitation messages"
    );
    messages
}
