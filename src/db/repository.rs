//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the HTTP handlers.
//! Methods return `Send` futures so handlers stay usable from axum.

use crate::db::{
    DbResult,
    models::{Id, StudentItem, TaskItem},
};

/// Repository for TaskItem operations.
pub trait TaskItemRepository {
    /// Get a task item by ID, `None` if absent.
    fn find_by_id(&self, id: Id) -> impl Future<Output = DbResult<Option<TaskItem>>> + Send;

    /// Get all task items in store order (ascending ID).
    fn find_all(&self) -> impl Future<Output = DbResult<Vec<TaskItem>>> + Send;

    /// Insert when `item.id == 0`, otherwise update guarded by `item.version`.
    ///
    /// Returns the stored item with its assigned ID and new version. An update
    /// that matches no row at the expected version fails with
    /// `DbError::Conflict`.
    fn save(&self, item: &TaskItem) -> impl Future<Output = DbResult<TaskItem>> + Send;

    /// Delete a task item by ID. Fails with `DbError::NotFound` if absent.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;

    /// Check whether a task item with this ID exists.
    fn exists(&self, id: Id) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Repository for StudentItem operations.
pub trait StudentItemRepository {
    /// Get a student item by ID, `None` if absent.
    fn find_by_id(&self, id: Id) -> impl Future<Output = DbResult<Option<StudentItem>>> + Send;

    /// Get all student items in store order (ascending ID).
    fn find_all(&self) -> impl Future<Output = DbResult<Vec<StudentItem>>> + Send;

    /// Insert when `item.id == 0`, otherwise update guarded by `item.version`.
    fn save(&self, item: &StudentItem) -> impl Future<Output = DbResult<StudentItem>> + Send;

    /// Delete a student item by ID. Fails with `DbError::NotFound` if absent.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;

    /// Check whether a student item with this ID exists.
    fn exists(&self, id: Id) -> impl Future<Output = DbResult<bool>> + Send;

    /// Check whether any student item already uses this email.
    fn exists_by_email(&self, email: &str) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Combined database interface.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type TaskItems<'a>: TaskItemRepository + Send + Sync
    where
        Self: 'a;
    type StudentItems<'a>: StudentItemRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> DbResult<()>;

    /// Get the task item repository.
    fn task_items(&self) -> Self::TaskItems<'_>;

    /// Get the student item repository.
    fn student_items(&self) -> Self::StudentItems<'_>;
}
