//! Local persistence for users, events and the login session.
//!
//! ```text
//! <data_dir>/users/      one file per user, plus an insertion-order index
//! <data_dir>/events/     one file per event, plus an insertion-order index
//! <data_dir>/session.json
//! <data_dir>/.lock
//! ```
//!
//! Every write touches only the affected record. Creates, and every
//! load-change-save of an existing record, run under an exclusive file lock
//! so concurrent writers can't lose updates.
//! Reads never fail: anything missing or unreadable is treated as absent.

mod collection;
mod lock;

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::RsvpConfig;
use crate::error::RsvpResult;
use crate::event::{Event, EventPatch, NewEvent};
use crate::user::{SessionUser, User};
use collection::{Collection, write_atomic};

const SESSION_FILE: &str = "session.json";

#[derive(Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Store { root: root.into() }
    }

    pub fn from_config(config: &RsvpConfig) -> Self {
        Self::new(config.data_path())
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    fn users_collection(&self) -> Collection {
        Collection::new(self.root.join("users"))
    }

    fn events_collection(&self) -> Collection {
        Collection::new(self.root.join("events"))
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub fn users(&self) -> Vec<User> {
        self.users_collection().load_all()
    }

    /// Always creates a new account, even if the email is already taken.
    pub fn create_user(&self, email: &str, password: &str) -> RsvpResult<User> {
        let user = User::new(email, password);

        let _lock = lock::acquire(&self.root)?;
        self.users_collection().insert(&user.id, &user)?;

        tracing::info!(user_id = %user.id, email, "Created user");
        Ok(user)
    }

    /// First user matching both fields exactly.
    pub fn find_user(&self, email: &str, password: &str) -> Option<User> {
        self.users().into_iter().find(|u| u.matches(email, password))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// All events in creation order.
    pub fn events(&self) -> Vec<Event> {
        let events: Vec<Event> = self.events_collection().load_all();
        tracing::debug!(count = events.len(), "Loaded events");
        events
    }

    pub fn events_by_host(&self, host_id: &str) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.host_id == host_id)
            .collect()
    }

    pub fn event(&self, id: &str) -> Option<Event> {
        self.events_collection().load(id)
    }

    pub fn create_event(&self, new_event: NewEvent) -> RsvpResult<Event> {
        let event = new_event.into_event(uuid::Uuid::new_v4().to_string());

        let _lock = lock::acquire(&self.root)?;
        self.events_collection().insert(&event.id, &event)?;

        tracing::info!(
            event_id = %event.id,
            host_id = %event.host_id,
            guests = event.guests.len(),
            "Created event"
        );
        Ok(event)
    }

    /// Merge `patch` into the stored event. `Ok(None)` if there is no such
    /// event, in which case nothing is written.
    pub fn update_event(&self, id: &str, patch: EventPatch) -> RsvpResult<Option<Event>> {
        self.modify_event(id, |event| event.apply(patch))
    }

    /// Load, change and save one event while holding the store lock, so a
    /// concurrent writer can't slip in between the read and the write.
    /// `Ok(None)` if there is no such event, in which case nothing is written.
    pub fn modify_event<F>(&self, id: &str, modify: F) -> RsvpResult<Option<Event>>
    where
        F: FnOnce(&mut Event),
    {
        let events = self.events_collection();
        if !events.contains(id) {
            return Ok(None);
        }

        let _lock = lock::acquire(&self.root)?;

        let Some(mut event) = events.load::<Event>(id) else {
            return Ok(None);
        };

        modify(&mut event);
        event.last_modified = Some(Utc::now());
        events.save(&event.id, &event)?;

        tracing::info!(event_id = %event.id, "Updated event");
        Ok(Some(event))
    }

    // =========================================================================
    // Session slot
    // =========================================================================

    /// The persisted session user, if the slot holds a well-formed record.
    pub fn session_user(&self) -> Option<SessionUser> {
        let path = self.root.join(SESSION_FILE);
        let content = std::fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed session record");
                None
            }
        }
    }

    pub fn save_session_user(&self, user: &SessionUser) -> RsvpResult<()> {
        std::fs::create_dir_all(&self.root)?;
        let content = serde_json::to_vec_pretty(user)?;
        write_atomic(&self.root.join(SESSION_FILE), &content)
    }

    pub fn clear_session_user(&self) -> RsvpResult<()> {
        match std::fs::remove_file(self.root.join(SESSION_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, GuestStatus};
    use crate::rsvp::{Response, apply_rsvp};
    use std::collections::BTreeMap;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("data"));
        (dir, store)
    }

    fn new_event(host_id: &str, title: &str, guests: &[&str]) -> NewEvent {
        NewEvent::from_draft(
            EventDraft {
                title: title.into(),
                date: "2025-03-20T15:00".into(),
                location: "Rooftop".into(),
                description: "".into(),
                guest_emails: guests.iter().map(|g| g.to_string()).collect(),
            },
            host_id,
        )
        .unwrap()
    }

    /// Every file under `dir` with its bytes.
    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        let mut files = BTreeMap::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(d) = stack.pop() {
            for entry in std::fs::read_dir(&d).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    files.insert(path.clone(), std::fs::read(&path).unwrap());
                }
            }
        }
        files
    }

    #[test]
    fn test_empty_store_has_no_records() {
        let (_dir, store) = store();
        assert!(store.users().is_empty());
        assert!(store.events().is_empty());
        assert!(store.event("missing").is_none());
        assert!(store.session_user().is_none());
    }

    #[test]
    fn test_create_then_find_user() {
        let (_dir, store) = store();
        store.create_user("a@x.com", "pw1").unwrap();

        let found = store.find_user("a@x.com", "pw1").unwrap();
        assert_eq!(found.email, "a@x.com");
        assert!(store.find_user("a@x.com", "wrong").is_none());
    }

    #[test]
    fn test_duplicate_signup_creates_two_accounts_and_first_wins() {
        let (_dir, store) = store();
        let first = store.create_user("a@x.com", "pw").unwrap();
        let second = store.create_user("a@x.com", "pw").unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.users().len(), 2);
        assert_eq!(store.find_user("a@x.com", "pw").unwrap().id, first.id);
    }

    #[test]
    fn test_create_event_round_trips() {
        let (_dir, store) = store();
        let created = store
            .create_event(new_event("h1", "Party", &["g1@x.com", "g2@x.com"]))
            .unwrap();

        assert_eq!(created.total_invited, 2);
        assert!(created.guests.iter().all(|g| g.status == GuestStatus::Pending));
        assert_eq!(store.event(&created.id), Some(created));
    }

    #[test]
    fn test_events_by_host_keeps_creation_order() {
        let (_dir, store) = store();
        let a = store.create_event(new_event("h1", "A", &["g@x.com"])).unwrap();
        store.create_event(new_event("h2", "B", &["g@x.com"])).unwrap();
        let c = store.create_event(new_event("h1", "C", &["g@x.com"])).unwrap();

        let ids: Vec<String> = store.events_by_host("h1").into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert_eq!(store.events().len(), 3);
    }

    #[test]
    fn test_update_event_merges_fields() {
        let (_dir, store) = store();
        let created = store.create_event(new_event("h1", "Party", &["g@x.com"])).unwrap();

        let updated = store
            .update_event(
                &created.id,
                EventPatch {
                    title: Some("Bigger party".into()),
                    ..EventPatch::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Bigger party");
        assert_eq!(updated.location, created.location);
        assert!(updated.last_modified.is_some());
        assert_eq!(store.event(&created.id), Some(updated));
    }

    #[test]
    fn test_update_missing_event_writes_nothing() {
        let (_dir, store) = store();
        store.create_event(new_event("h1", "Party", &["g@x.com"])).unwrap();
        let before = snapshot(store.path());

        let result = store
            .update_event("no-such-event", EventPatch::guests(vec![]))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(snapshot(store.path()), before);
    }

    #[test]
    fn test_session_slot_round_trip_and_clear() {
        let (_dir, store) = store();
        let user = User::new("a@x.com", "pw").without_password();

        store.save_session_user(&user).unwrap();
        assert_eq!(store.session_user(), Some(user));

        store.clear_session_user().unwrap();
        assert!(store.session_user().is_none());
        // Clearing twice is fine.
        store.clear_session_user().unwrap();
    }

    #[test]
    fn test_concurrent_creates_are_all_indexed() {
        let (_dir, store) = store();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .create_event(new_event("h1", &format!("E{i}"), &["g@x.com"]))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let index = std::fs::read_to_string(store.path().join("events/index")).unwrap();
        assert_eq!(index.lines().count(), 8);
        assert_eq!(store.events().len(), 8);
    }

    #[test]
    fn test_concurrent_rsvps_are_all_kept() {
        let (_dir, store) = store();
        let guests: Vec<String> = (0..8).map(|i| format!("g{i}@x.com")).collect();
        let guest_refs: Vec<&str> = guests.iter().map(String::as_str).collect();
        let event = store.create_event(new_event("h1", "Party", &guest_refs)).unwrap();

        let handles: Vec<_> = guests
            .into_iter()
            .map(|email| {
                let store = store.clone();
                let id = event.id.clone();
                std::thread::spawn(move || {
                    apply_rsvp(&store, &id, &email, Response::Confirmed).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stored = store.event(&event.id).unwrap();
        assert_eq!(stored.confirmed_guests(), 8);
        assert_eq!(stored.stats().pending, 0);
    }

    #[test]
    fn test_modify_event_sees_latest_stored_state() {
        let (_dir, store) = store();
        let created = store.create_event(new_event("h1", "Party", &["g@x.com"])).unwrap();

        store
            .update_event(
                &created.id,
                EventPatch {
                    location: Some("Garden".into()),
                    ..EventPatch::default()
                },
            )
            .unwrap();

        let modified = store
            .modify_event(&created.id, |event| event.title.push_str(" II"))
            .unwrap()
            .unwrap();

        assert_eq!(modified.title, "Party II");
        assert_eq!(modified.location, "Garden");
        assert!(store.modify_event("missing", |_| {}).unwrap().is_none());
    }
}
