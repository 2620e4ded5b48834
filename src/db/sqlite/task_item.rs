//! SQLite TaskItemRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::{DbError, DbResult, INITIAL_VERSION, Id, TaskItem, TaskItemRepository};

const ENTITY: &str = "TaskItem";

/// SQLx-backed task item repository.
pub struct SqliteTaskItemRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_task_item(row: &SqliteRow) -> TaskItem {
    TaskItem {
        id: row.get("id"),
        name: row.get("name"),
        is_complete: row.get("is_complete"),
        secret: row.get("secret"),
        version: row.get("version"),
    }
}

impl<'a> TaskItemRepository for SqliteTaskItemRepository<'a> {
    async fn find_by_id(&self, id: Id) -> DbResult<Option<TaskItem>> {
        let row = sqlx::query(
            "SELECT id, name, is_complete, secret, version FROM task_item WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_task_item))
    }

    async fn find_all(&self) -> DbResult<Vec<TaskItem>> {
        let rows =
            sqlx::query("SELECT id, name, is_complete, secret, version FROM task_item ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.iter().map(row_to_task_item).collect())
    }

    async fn save(&self, item: &TaskItem) -> DbResult<TaskItem> {
        if item.id == 0 {
            let result = sqlx::query(
                "INSERT INTO task_item (name, is_complete, secret, version) VALUES (?, ?, ?, ?)",
            )
            .bind(&item.name)
            .bind(item.is_complete)
            .bind(&item.secret)
            .bind(INITIAL_VERSION)
            .execute(self.pool)
            .await?;

            return Ok(TaskItem {
                id: result.last_insert_rowid(),
                version: INITIAL_VERSION,
                ..item.clone()
            });
        }

        let result = sqlx::query(
            r#"
            UPDATE task_item
            SET name = ?, is_complete = ?, secret = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&item.name)
        .bind(item.is_complete)
        .bind(&item.secret)
        .bind(item.id)
        .bind(item.version)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::conflict(ENTITY, item.id));
        }

        Ok(TaskItem {
            version: item.version + 1,
            ..item.clone()
        })
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM task_item WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM task_item WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }
}
