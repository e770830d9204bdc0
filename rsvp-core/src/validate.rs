//! Input validation, run before anything is written to the store.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::error::{RsvpError, RsvpResult};
use crate::event::{EventDraft, EventTime};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Offset-less formats accepted for event dates, most specific first.
const FLOATING_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Parse an event date string.
/// - RFC 3339 with offset → UTC
/// - `YYYY-MM-DDTHH:MM[:SS]` → floating wall-clock time
/// - `YYYY-MM-DD` → midnight UTC
pub fn parse_event_date(input: &str) -> Option<EventTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(EventTime::DateTimeUtc(dt.with_timezone(&Utc)));
    }

    if let Some(dt) = FLOATING_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Some(EventTime::DateTimeFloating(dt));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| EventTime::DateTimeUtc(dt.and_utc()))
}

pub fn is_valid_date(input: &str) -> bool {
    parse_event_date(input).is_some()
}

/// Split a comma-separated guest list, trimming entries and dropping
/// anything that is not a well-formed email.
pub fn parse_email_list(emails: &str) -> Vec<String> {
    emails
        .split(',')
        .map(str::trim)
        .filter(|email| {
            let valid = is_valid_email(email);
            if !valid && !email.is_empty() {
                tracing::warn!(email = %email, "Dropping malformed guest email");
            }
            valid
        })
        .map(String::from)
        .collect()
}

pub fn credentials(email: &str, password: &str) -> RsvpResult<()> {
    if !is_valid_email(email) {
        return Err(RsvpError::Validation(format!(
            "Invalid email address '{}'",
            email
        )));
    }
    if password.is_empty() {
        return Err(RsvpError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

pub fn event_draft(draft: &EventDraft) -> RsvpResult<()> {
    if draft.title.trim().is_empty() {
        return Err(RsvpError::Validation("Event title is required".into()));
    }

    if !is_valid_date(&draft.date) {
        return Err(RsvpError::Validation(format!(
            "Please enter a valid date (got '{}')",
            draft.date
        )));
    }

    if draft.location.trim().is_empty() {
        return Err(RsvpError::Validation("Event location is required".into()));
    }

    if draft.guest_emails.is_empty() {
        return Err(RsvpError::Validation(
            "Please enter at least one valid email address".into(),
        ));
    }

    if let Some(bad) = draft
        .guest_emails
        .iter()
        .find(|email| !is_valid_email(email.trim()))
    {
        return Err(RsvpError::Validation(format!(
            "Invalid guest email '{}'",
            bad
        )));
    }

    Ok(())
}
