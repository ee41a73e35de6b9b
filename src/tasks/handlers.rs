use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthenticatedIdentity;
use crate::db::models::{NewTask, Task, TaskChanges};
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::tasks::query::ListParams;
use crate::AppState;

const TASK_NOT_FOUND: &str = "Task not found";

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct CreatedTask {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: i64,
    #[serde(flatten)]
    pub changes: TaskChanges,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTaskRequest {
    pub id: i64,
}

pub async fn list_tasks(
    identity: AuthenticatedIdentity,
    params: web::Query<ListParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = params.parse()?;
    let tasks = state.tasks.list_tasks(identity.user_id, query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("", TaskList { tasks })))
}

pub async fn create_task(
    identity: AuthenticatedIdentity,
    req: web::Json<NewTask>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let task = state.tasks.create_task(identity.user_id, req.into_inner()).await?;
    info!(user_id = identity.user_id, task_id = task.id, "Task created");

    Ok(HttpResponse::Ok().json(ApiResponse::success("", CreatedTask { id: task.id })))
}

pub async fn update_task(
    identity: AuthenticatedIdentity,
    req: web::Json<UpdateTaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let UpdateTaskRequest { id, changes } = req.into_inner();

    state
        .tasks
        .update_task(identity.user_id, id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

pub async fn delete_task(
    identity: AuthenticatedIdentity,
    req: web::Json<DeleteTaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deleted = state.tasks.delete_task(identity.user_id, req.id).await?;
    if !deleted {
        return Err(AppError::NotFound(TASK_NOT_FOUND.to_string()));
    }
    info!(user_id = identity.user_id, task_id = req.id, "Task deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}
