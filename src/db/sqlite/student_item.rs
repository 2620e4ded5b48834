//! SQLite StudentItemRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::{DbError, DbResult, INITIAL_VERSION, Id, StudentItem, StudentItemRepository};

const ENTITY: &str = "StudentItem";

/// SQLx-backed student item repository.
pub struct SqliteStudentItemRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_student_item(row: &SqliteRow) -> StudentItem {
    StudentItem {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        payment_reference: row.get("payment_reference"),
        version: row.get("version"),
    }
}

impl<'a> StudentItemRepository for SqliteStudentItemRepository<'a> {
    async fn find_by_id(&self, id: Id) -> DbResult<Option<StudentItem>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, payment_reference, version
            FROM student_item
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_student_item))
    }

    async fn find_all(&self) -> DbResult<Vec<StudentItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, payment_reference, version
            FROM student_item
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(row_to_student_item).collect())
    }

    async fn save(&self, item: &StudentItem) -> DbResult<StudentItem> {
        if item.id == 0 {
            let result = sqlx::query(
                r#"
                INSERT INTO student_item (first_name, last_name, email, payment_reference, version)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.first_name)
            .bind(&item.last_name)
            .bind(&item.email)
            .bind(item.payment_reference)
            .bind(INITIAL_VERSION)
            .execute(self.pool)
            .await?;

            return Ok(StudentItem {
                id: result.last_insert_rowid(),
                version: INITIAL_VERSION,
                ..item.clone()
            });
        }

        // payment_reference is fixed at creation and never rewritten.
        let result = sqlx::query(
            r#"
            UPDATE student_item
            SET first_name = ?, last_name = ?, email = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&item.first_name)
        .bind(&item.last_name)
        .bind(&item.email)
        .bind(item.id)
        .bind(item.version)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::conflict(ENTITY, item.id));
        }

        Ok(StudentItem {
            version: item.version + 1,
            ..item.clone()
        })
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM student_item WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_item WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_item WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }
}
