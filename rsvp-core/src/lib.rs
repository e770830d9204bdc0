//! Core of the rsvp tool.
//!
//! - `store` persists users, events and the login session
//! - `session` holds who is logged in
//! - `event` / `rsvp` model guest lists and responses
//! - `watch` keeps views fresh by polling the store
//! - `export` turns an event into CSV, a printable report or an .ics invite

pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod invite;
pub mod rsvp;
pub mod session;
pub mod store;
pub mod user;
pub mod validate;
pub mod watch;

pub use error::{RsvpError, RsvpResult};
pub use event::{Event, EventDraft, EventPatch, Guest, GuestStats, GuestStatus, NewEvent};
pub use rsvp::{Response, apply_rsvp};
pub use session::{AuthState, Session};
pub use store::Store;
pub use user::{SessionUser, User};
