//! Persistence interfaces consumed by the auth core and the task handlers.
//!
//! Both are implemented by [`DbOperations`](super::DbOperations) for PostgreSQL
//! and by [`MemoryStore`](super::MemoryStore) for tests and local runs.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::db::models::{NewTask, NewUser, Task, TaskChanges, User};
use crate::error::DatabaseError;

/// Tasks returned per page of `GET /task`.
pub const PAGE_SIZE: i64 = 5;

/// Columns a task listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Title,
    DueDate,
    Priority,
    #[default]
    CreatedAt,
    UpdatedAt,
    UserId,
}

impl OrderField {
    pub const ALL: [OrderField; 7] = [
        OrderField::Id,
        OrderField::Title,
        OrderField::DueDate,
        OrderField::Priority,
        OrderField::CreatedAt,
        OrderField::UpdatedAt,
        OrderField::UserId,
    ];

    /// Name used in query strings and JSON.
    pub fn api_name(self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::Title => "title",
            OrderField::DueDate => "dueDate",
            OrderField::Priority => "priority",
            OrderField::CreatedAt => "createdAt",
            OrderField::UpdatedAt => "updatedAt",
            OrderField::UserId => "userId",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::Title => "title",
            OrderField::DueDate => "due_date",
            OrderField::Priority => "priority",
            OrderField::CreatedAt => "created_at",
            OrderField::UpdatedAt => "updated_at",
            OrderField::UserId => "user_id",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// One page of an owner's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskListQuery {
    /// 1-based.
    pub page: i64,
    pub order_field: OrderField,
    pub order_direction: OrderDirection,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            order_field: OrderField::default(),
            order_direction: OrderDirection::default(),
        }
    }
}

impl TaskListQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. A taken email yields [`DatabaseError::Duplicate`].
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
}

/// Every operation is scoped to `owner`; a task owned by someone else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self, owner: i64, query: TaskListQuery) -> Result<Vec<Task>, DatabaseError>;

    async fn create_task(&self, owner: i64, task: NewTask) -> Result<Task, DatabaseError>;

    async fn update_task(
        &self,
        owner: i64,
        id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Task>, DatabaseError>;

    /// Returns whether a task was removed.
    async fn delete_task(&self, owner: i64, id: i64) -> Result<bool, DatabaseError>;
}
