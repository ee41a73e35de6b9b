//! In-process store for tests and single-node development runs.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::db::models::{NewTask, NewUser, Task, TaskChanges, User};
use crate::db::store::{OrderDirection, OrderField, TaskListQuery, TaskStore, UserStore, PAGE_SIZE};
use crate::error::DatabaseError;

#[derive(Debug, Default)]
struct InnerState {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    next_user_id: i64,
    next_task_id: i64,
}

/// Ids start at 1 and increase monotonically, matching a serial column.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Task, b: &Task, field: OrderField) -> Ordering {
    match field {
        OrderField::Id => a.id.cmp(&b.id),
        OrderField::Title => a.title.cmp(&b.title),
        // NULLs sort last, as in PostgreSQL.
        OrderField::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        OrderField::Priority => a.priority.cmp(&b.priority),
        OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
        OrderField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        OrderField::UserId => a.user_id.cmp(&b.user_id),
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Duplicate("email must be unique".to_string()));
        }

        state.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: state.next_user_id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, owner: i64, query: TaskListQuery) -> Result<Vec<Task>, DatabaseError> {
        let state = self.state.read().await;

        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect();

        tasks.sort_by(|a, b| {
            let ordering = compare(a, b, query.order_field);
            let ordering = match query.order_direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            };
            ordering.then(a.id.cmp(&b.id))
        });

        Ok(tasks
            .into_iter()
            .skip(query.offset().max(0) as usize)
            .take(PAGE_SIZE as usize)
            .collect())
    }

    async fn create_task(&self, owner: i64, task: NewTask) -> Result<Task, DatabaseError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&owner) {
            return Err(DatabaseError::QueryError(format!("unknown task owner {}", owner)));
        }

        state.next_task_id += 1;
        let now = Utc::now();
        let created = Task {
            id: state.next_task_id,
            title: task.title,
            due_date: task.due_date,
            priority: task.priority,
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update_task(
        &self,
        owner: i64,
        id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Task>, DatabaseError> {
        let mut state = self.state.write().await;

        let Some(task) = state.tasks.get_mut(&id).filter(|t| t.user_id == owner) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, owner: i64, id: i64) -> Result<bool, DatabaseError> {
        let mut state = self.state.write().await;

        let owned = state.tasks.get(&id).is_some_and(|t| t.user_id == owner);
        if owned {
            state.tasks.remove(&id);
        }
        Ok(owned)
    }
}
