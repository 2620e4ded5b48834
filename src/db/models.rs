//! Domain models for the items database.
//!
//! These models are storage-agnostic and represent the persisted entities.
//! They carry fields that never leave the server (`secret`,
//! `payment_reference`, `version`); the API layer maps them to DTOs.

/// Store-generated integer ID used for all entities. `0` means "not yet saved".
pub type Id = i64;

/// Version assigned to a freshly inserted row.
pub const INITIAL_VERSION: i64 = 1;

/// A to-do style task item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskItem {
    pub id: Id,
    pub name: Option<String>,
    pub is_complete: bool,
    /// Server-side only, never serialized to clients.
    pub secret: Option<String>,
    /// Optimistic concurrency token.
    pub version: i64,
}

impl TaskItem {
    /// Build an unsaved task item.
    pub fn new(name: Option<String>, is_complete: bool) -> Self {
        Self {
            id: 0,
            name,
            is_complete,
            secret: None,
            version: INITIAL_VERSION,
        }
    }
}

/// A student enrolment record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentItem {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    /// Unique across student items (checked on create).
    pub email: String,
    /// Assigned once at creation, in `1..=4`.
    pub payment_reference: i32,
    /// Optimistic concurrency token.
    pub version: i64,
}

impl StudentItem {
    /// Build an unsaved student item.
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        payment_reference: i32,
    ) -> Self {
        Self {
            id: 0,
            first_name,
            last_name,
            email,
            payment_reference,
            version: INITIAL_VERSION,
        }
    }
}
