//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod student_item;
mod task_item;


pub use connection::SqliteDatabase;
pub use student_item::SqliteStudentItemRepository;
pub use task_item::SqliteTaskItemRepository;
