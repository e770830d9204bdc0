//! End-to-end flows through the public API, the way the CLI drives them.

use rsvp_core::export::{self, ExportFormat};
use rsvp_core::{
    EventDraft, GuestStatus, NewEvent, Response, RsvpError, Session, Store, apply_rsvp,
};

fn draft(guests: &[&str]) -> EventDraft {
    EventDraft {
        title: "Housewarming".into(),
        date: "2025-09-13T18:30".into(),
        location: "12 Elm St".into(),
        description: "Food, drinks, moving boxes".into(),
        guest_emails: guests.iter().map(|g| g.to_string()).collect(),
    }
}

#[test]
fn test_login_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    store.create_user("a@x.com", "pw1").unwrap();

    let mut session = Session::restore(store);
    assert_eq!(session.login("a@x.com", "pw1").unwrap().email, "a@x.com");

    session.logout().unwrap();
    assert!(matches!(
        session.login("a@x.com", "wrong"),
        Err(RsvpError::InvalidCredentials)
    ));
}

#[test]
fn test_rsvp_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());

    let mut session = Session::restore(store.clone());
    let host_id = session.signup("host@x.com", "pw").unwrap().id.clone();

    let event = store
        .create_event(NewEvent::from_draft(draft(&["g1@x.com", "g2@x.com"]), &host_id).unwrap())
        .unwrap();
    assert_eq!(event.total_invited, 2);

    let event = apply_rsvp(&store, &event.id, "g1@x.com", Response::Confirmed).unwrap();
    assert_eq!(event.confirmed_guests(), 1);

    let event = apply_rsvp(&store, &event.id, "g2@x.com", Response::Declined).unwrap();
    assert_eq!(event.confirmed_guests(), 1);

    let stats = event.stats();
    assert_eq!((stats.confirmed, stats.declined, stats.pending), (1, 1, 0));
    assert_eq!(event.total_invited, 2);

    // What the dashboard sees after a fresh load.
    let listed = store.events_by_host(&host_id);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].confirmed_guests(), 1);
}

#[test]
fn test_rsvp_for_unknown_guest_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let event = store
        .create_event(NewEvent::from_draft(draft(&["g1@x.com"]), "host").unwrap())
        .unwrap();
    let event = apply_rsvp(&store, &event.id, "g1@x.com", Response::Confirmed).unwrap();

    let after = apply_rsvp(&store, &event.id, "nonexistent@x.com", Response::Confirmed).unwrap();

    assert_eq!(after.guests, event.guests);
    assert_eq!(after.confirmed_guests(), event.confirmed_guests());
}

#[test]
fn test_rsvp_sequence_keeps_count_in_step() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let guests = ["a@x.com", "b@x.com", "c@x.com"];
    let event = store
        .create_event(NewEvent::from_draft(draft(&guests), "host").unwrap())
        .unwrap();

    let steps = [
        ("a@x.com", Response::Confirmed),
        ("b@x.com", Response::Confirmed),
        ("a@x.com", Response::Declined),
        ("c@x.com", Response::Confirmed),
        ("c@x.com", Response::Confirmed),
    ];

    for (email, response) in steps {
        let event = apply_rsvp(&store, &event.id, email, response).unwrap();
        let confirmed = event
            .guests
            .iter()
            .filter(|g| g.status == GuestStatus::Confirmed)
            .count();
        assert_eq!(event.confirmed_guests(), confirmed);

        let stored: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(format!("events/{}.json", event.id)))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(stored["confirmedGuests"], confirmed);
    }
}

#[test]
fn test_rsvp_on_missing_event_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());

    let err = apply_rsvp(&store, "missing", "g@x.com", Response::Confirmed).unwrap_err();
    assert!(matches!(err, RsvpError::EventNotFound(_)));
}

#[test]
fn test_invalid_draft_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("data"));

    let mut bad = draft(&["g@x.com"]);
    bad.date = "not a date".into();
    assert!(matches!(
        NewEvent::from_draft(bad, "host"),
        Err(RsvpError::Validation(_))
    ));

    assert!(!store.path().exists());
}

#[test]
fn test_exports_of_stored_event() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let event = store
        .create_event(NewEvent::from_draft(draft(&["g1@x.com"]), "host").unwrap())
        .unwrap();
    let event = store.event(&event.id).unwrap();

    let csv = export::export(&event, ExportFormat::Csv, "http://localhost:5173").unwrap();
    assert!(csv.starts_with("Email,Status,RSVP Date\r\n"));

    let report = export::export(&event, ExportFormat::Report, "http://localhost:5173").unwrap();
    assert!(report.contains("Date: Saturday, September 13, 2025 at 06:30 PM"));

    let ics = export::export(&event, ExportFormat::Ics, "http://localhost:5173").unwrap();
    assert!(ics.contains("DTEND:20250913T203000"));
    assert!(ics.contains(&format!("URL:http://localhost:5173/event/{}", event.id)));
}
