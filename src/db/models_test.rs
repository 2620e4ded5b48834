//! Tests for domain models.

use crate::db::{INITIAL_VERSION, StudentItem, TaskItem};

#[test]
fn new_task_item_is_unsaved() {
    let item = TaskItem::new(Some("buy milk".to_string()), false);

    assert_eq!(item.id, 0);
    assert_eq!(item.name.as_deref(), Some("buy milk"));
    assert!(!item.is_complete);
    assert!(item.secret.is_none());
    assert_eq!(item.version, INITIAL_VERSION);
}

#[test]
fn new_task_item_accepts_missing_name() {
    let item = TaskItem::new(None, true);

    assert!(item.name.is_none());
    assert!(item.is_complete);
}

#[test]
fn new_student_item_is_unsaved() {
    let student = StudentItem::new(
        "Ada".to_string(),
        "Lovelace".to_string(),
        "ada@example.com".to_string(),
        2,
    );

    assert_eq!(student.id, 0);
    assert_eq!(student.first_name, "Ada");
    assert_eq!(student.last_name, "Lovelace");
    assert_eq!(student.email, "ada@example.com");
    assert_eq!(student.payment_reference, 2);
    assert_eq!(student.version, INITIAL_VERSION);
}
