use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::db::models::{NewTask, NewUser, Task, TaskChanges, User};
use crate::db::store::{TaskListQuery, TaskStore, UserStore, PAGE_SIZE};
use crate::error::DatabaseError;

const USER_COLUMNS: &str = "id, email, password_hash, created_at, updated_at";
const TASK_COLUMNS: &str = "id, title, due_date, priority, user_id, created_at, updated_at";

/// PostgreSQL-backed user and task store.
#[derive(Clone)]
pub struct DbOperations {
    pool: PgPool,
}

impl DbOperations {
    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for DbOperations {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let query = format!(
            "INSERT INTO users (email, password_hash, created_at, updated_at) \
             VALUES ($1, $2, now(), now()) RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl TaskStore for DbOperations {
    async fn list_tasks(&self, owner: i64, query: TaskListQuery) -> Result<Vec<Task>, DatabaseError> {
        // ORDER BY cannot be bound; both parts come from closed enums.
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 \
             ORDER BY {} {}, id ASC LIMIT $2 OFFSET $3",
            query.order_field.column(),
            query.order_direction.as_sql(),
        );

        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .bind(PAGE_SIZE)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn create_task(&self, owner: i64, task: NewTask) -> Result<Task, DatabaseError> {
        let sql = format!(
            "INSERT INTO tasks (title, due_date, priority, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, now(), now()) RETURNING {TASK_COLUMNS}"
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(&task.title)
            .bind(task.due_date)
            .bind(task.priority)
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }

    async fn update_task(
        &self,
        owner: i64,
        id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Task>, DatabaseError> {
        let sql = format!(
            "UPDATE tasks SET \
                title = COALESCE($1, title), \
                due_date = CASE WHEN $6 THEN $2 ELSE due_date END, \
                priority = COALESCE($3, priority), \
                updated_at = now() \
             WHERE id = $4 AND user_id = $5 \
             RETURNING {TASK_COLUMNS}"
        );

        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query_as::<_, Task>(&sql)
            .bind(changes.title)
            .bind(changes.due_date.flatten())
            .bind(changes.priority)
            .bind(id)
            .bind(owner)
            .bind(changes.due_date.is_some())
            .fetch_optional(&mut *transaction)
            .await;

        match result {
            Ok(task) => {
                transaction.commit().await?;
                Ok(task)
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn delete_task(&self, owner: i64, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
