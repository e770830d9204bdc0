//! Events, their embedded guest lists, and the values derived from them.
//!
//! `confirmed_guests` is never stored state: it is computed from the guest
//! list whenever it is read. The persisted JSON still carries a
//! `confirmedGuests` field, written from the computed value and ignored on
//! load, so stored records keep the same shape as before.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};
use crate::validate;

/// A guest's answer to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    Pending,
    Confirmed,
    Declined,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Pending => "pending",
            GuestStatus::Confirmed => "confirmed",
            GuestStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invitee, embedded in its event's guest list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub email: String,
    pub status: GuestStatus,
    /// Part of the stored record shape; nothing sets it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsvp_date: Option<String>,
}

impl Guest {
    pub fn invited(email: &str) -> Self {
        Guest {
            email: email.to_string(),
            status: GuestStatus::Pending,
            rsvp_date: None,
        }
    }
}

/// Aggregate counts over a guest list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuestStats {
    pub confirmed: usize,
    pub declined: usize,
    pub pending: usize,
    pub total: usize,
}

impl GuestStats {
    pub fn from_guests(guests: &[Guest]) -> Self {
        guests.iter().fold(
            GuestStats {
                total: guests.len(),
                ..GuestStats::default()
            },
            |mut stats, guest| {
                match guest.status {
                    GuestStatus::Confirmed => stats.confirmed += 1,
                    GuestStatus::Declined => stats.declined += 1,
                    GuestStatus::Pending => stats.pending += 1,
                }
                stats
            },
        )
    }
}

/// Start time of an event, as parsed from its stored `date` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// Input carried a UTC offset (or was a bare date).
    DateTimeUtc(DateTime<Utc>),
    /// Wall-clock input without an offset, e.g. `2025-03-20T15:00`.
    DateTimeFloating(NaiveDateTime),
}

impl EventTime {
    pub fn plus(&self, duration: Duration) -> EventTime {
        match self {
            EventTime::DateTimeUtc(dt) => EventTime::DateTimeUtc(*dt + duration),
            EventTime::DateTimeFloating(dt) => EventTime::DateTimeFloating(*dt + duration),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::DateTimeUtc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            EventTime::DateTimeFloating(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
        }
    }
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EventRecord", from = "EventRecord")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// ISO timestamp as entered by the host.
    pub date: String,
    pub location: String,
    pub description: String,
    pub host_id: String,
    pub created_at: DateTime<Utc>,
    /// Guest count at creation time; not recomputed afterwards.
    pub total_invited: usize,
    /// Invitation order. Duplicate emails are kept.
    pub guests: Vec<Guest>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Event {
    pub fn confirmed_guests(&self) -> usize {
        self.stats().confirmed
    }

    pub fn stats(&self) -> GuestStats {
        GuestStats::from_guests(&self.guests)
    }

    /// First guest with exactly this email.
    pub fn guest(&self, email: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.email == email)
    }

    pub fn start_time(&self) -> RsvpResult<EventTime> {
        validate::parse_event_date(&self.date).ok_or_else(|| {
            RsvpError::Validation(format!("Invalid event date '{}'", self.date))
        })
    }

    /// Shallow merge: every field set in the patch replaces the current one.
    pub fn apply(&mut self, patch: EventPatch) {
        let EventPatch {
            title,
            date,
            location,
            description,
            total_invited,
            guests,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(total_invited) = total_invited {
            self.total_invited = total_invited;
        }
        if let Some(guests) = guests {
            self.guests = guests;
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Partial update for [`crate::store::Store::update_event`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub total_invited: Option<usize>,
    pub guests: Option<Vec<Guest>>,
}

impl EventPatch {
    pub fn guests(guests: Vec<Guest>) -> Self {
        EventPatch {
            guests: Some(guests),
            ..EventPatch::default()
        }
    }
}

/// Host input for a new event, before validation.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub guest_emails: Vec<String>,
}

/// A validated event that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub host_id: String,
    pub created_at: DateTime<Utc>,
    pub total_invited: usize,
    pub guests: Vec<Guest>,
}

impl NewEvent {
    /// Validate a draft and build the record every guest starts `pending` in.
    pub fn from_draft(draft: EventDraft, host_id: &str) -> RsvpResult<Self> {
        validate::event_draft(&draft)?;

        let guests: Vec<Guest> = draft
            .guest_emails
            .iter()
            .map(|email| Guest::invited(email.trim()))
            .collect();

        Ok(NewEvent {
            title: draft.title.trim().to_string(),
            date: draft.date.trim().to_string(),
            location: draft.location.trim().to_string(),
            description: draft.description,
            host_id: host_id.to_string(),
            created_at: Utc::now(),
            total_invited: guests.len(),
            guests,
        })
    }

    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            location: self.location,
            description: self.description,
            host_id: self.host_id,
            created_at: self.created_at,
            total_invited: self.total_invited,
            guests: self.guests,
            last_modified: None,
        }
    }
}

/// On-disk shape of an [`Event`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    id: String,
    title: String,
    date: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    host_id: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    confirmed_guests: usize,
    total_invited: usize,
    #[serde(default)]
    guests: Vec<Guest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<DateTime<Utc>>,
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        EventRecord {
            confirmed_guests: event.confirmed_guests(),
            id: event.id,
            title: event.title,
            date: event.date,
            location: event.location,
            description: event.description,
            host_id: event.host_id,
            created_at: event.created_at,
            total_invited: event.total_invited,
            guests: event.guests,
            last_modified: event.last_modified,
        }
    }
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        Event {
            id: record.id,
            title: record.title,
            date: record.date,
            location: record.location,
            description: record.description,
            host_id: record.host_id,
            created_at: record.created_at,
            total_invited: record.total_invited,
            guests: record.guests,
            last_modified: record.last_modified,
        }
    }
}
