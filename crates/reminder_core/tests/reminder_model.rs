use chrono::{Duration, TimeZone, Utc};
use reminder_core::model::reminder::{normalize_text, MAX_TEXT_CHARS};
use reminder_core::{Priority, Reminder, ReminderValidationError};
use uuid::Uuid;

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 18, 9, 0, 0).unwrap()
}

#[test]
fn create_sets_defaults_and_trims_text() {
    let now = base_time();
    let due = now + Duration::days(1);

    let reminder = Reminder::create("  Pay rent  ", due, Priority::High, now).unwrap();

    assert!(!reminder.id.is_nil());
    assert_eq!(reminder.text, "Pay rent");
    assert_eq!(reminder.date_due, due);
    assert_eq!(reminder.date_creation, now);
    assert_eq!(reminder.priority, Priority::High);
    assert!(!reminder.completed);
}

#[test]
fn create_accepts_due_exactly_now() {
    let now = base_time();
    assert!(Reminder::create("now", now, Priority::Low, now).is_ok());
}

#[test]
fn create_rejects_past_due_date() {
    let now = base_time();
    let due = now - Duration::minutes(1);

    let err = Reminder::create("late", due, Priority::Low, now).unwrap_err();
    assert_eq!(err, ReminderValidationError::DueInPast { due, now });
}

#[test]
fn text_length_bound_is_exclusive() {
    let longest = "a".repeat(MAX_TEXT_CHARS - 1);
    assert_eq!(normalize_text(&longest).unwrap(), longest);

    let too_long = "a".repeat(MAX_TEXT_CHARS);
    assert_eq!(
        normalize_text(&too_long).unwrap_err(),
        ReminderValidationError::TextTooLong {
            len: MAX_TEXT_CHARS,
            max: MAX_TEXT_CHARS,
        }
    );
}

#[test]
fn text_length_counts_characters_not_bytes() {
    let text = "é".repeat(MAX_TEXT_CHARS - 1);
    assert!(normalize_text(&text).is_ok());
}

#[test]
fn blank_text_is_rejected() {
    assert_eq!(
        normalize_text(" \t ").unwrap_err(),
        ReminderValidationError::EmptyText
    );
}

#[test]
fn apply_edit_leaves_record_untouched_on_error() {
    let now = base_time();
    let mut reminder =
        Reminder::create("Call mom", now + Duration::days(7), Priority::Low, now).unwrap();
    let before = reminder.clone();

    let err = reminder
        .apply_edit("", now + Duration::days(1), Priority::High, now)
        .unwrap_err();
    assert_eq!(err, ReminderValidationError::EmptyText);
    assert_eq!(reminder, before);

    let err = reminder
        .apply_edit("Call dad", now - Duration::days(1), Priority::High, now)
        .unwrap_err();
    assert!(matches!(err, ReminderValidationError::DueInPast { .. }));
    assert_eq!(reminder, before);
}

#[test]
fn priority_parses_case_insensitively_and_exposes_style() {
    assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
    assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
    assert_eq!(Priority::Medium.style_class(), "priority-medium");
    assert!(Priority::High.rank() > Priority::Medium.rank());
    assert!(matches!(
        "urgent".parse::<Priority>(),
        Err(ReminderValidationError::UnknownPriority(value)) if value == "urgent"
    ));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let created = base_time();
    let due = created + Duration::hours(3);
    let mut reminder = Reminder::with_id(id, "Pay rent", due, Priority::High, created).unwrap();
    reminder.set_completed(true);

    let json = serde_json::to_value(&reminder).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["text"], "Pay rent");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["completed"], true);
    assert_eq!(json["dateDue"], "2026-03-18T12:00:00Z");
    assert_eq!(json["dateCreation"], "2026-03-18T09:00:00Z");

    let decoded: Reminder = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, reminder);
}

#[test]
fn decodes_javascript_date_strings_and_missing_completed() {
    let value = serde_json::json!({
        "text": "Call mom",
        "dateDue": "2024-03-18T10:00:00.000Z",
        "priority": "low",
        "dateCreation": "2024-03-11T08:30:00.000Z",
        "id": "11111111-2222-4333-8444-555555555555"
    });

    let reminder: Reminder = serde_json::from_value(value).unwrap();
    assert_eq!(
        reminder.date_due,
        Utc.with_ymd_and_hms(2024, 3, 18, 10, 0, 0).unwrap()
    );
    assert!(!reminder.completed);
}

#[test]
fn overdue_only_applies_to_open_reminders() {
    let now = base_time();
    let mut reminder = Reminder::create("soon", now, Priority::Low, now).unwrap();
    let later = now + Duration::hours(1);

    assert!(reminder.is_overdue(later));
    reminder.set_completed(true);
    assert!(!reminder.is_overdue(later));
}
