//! The route table: every endpoint, its handler, and whether it needs a token.
//!
//! The auth middleware consults [`Endpoint::resolve`] before dispatch, so a
//! route is protected unless it is listed here as public.

use actix_web::http::Method;
use actix_web::{web, Route};

use crate::auth::handlers::{login, register};
use crate::health_check;
use crate::tasks::handlers::{create_task, delete_task, list_tasks, update_task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Register,
    Login,
    ListTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Health,
        Endpoint::Register,
        Endpoint::Login,
        Endpoint::ListTasks,
        Endpoint::CreateTask,
        Endpoint::UpdateTask,
        Endpoint::DeleteTask,
    ];

    pub fn method(self) -> Method {
        match self {
            Endpoint::Health | Endpoint::ListTasks => Method::GET,
            Endpoint::Register | Endpoint::Login | Endpoint::CreateTask => Method::POST,
            Endpoint::UpdateTask => Method::PATCH,
            Endpoint::DeleteTask => Method::DELETE,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Health => "/health",
            Endpoint::Register => "/register",
            Endpoint::Login => "/login",
            Endpoint::ListTasks
            | Endpoint::CreateTask
            | Endpoint::UpdateTask
            | Endpoint::DeleteTask => "/task",
        }
    }

    pub fn access(self) -> Access {
        match self {
            Endpoint::Health | Endpoint::Register | Endpoint::Login => Access::Public,
            _ => Access::Protected,
        }
    }

    fn route(self) -> Route {
        let route = web::method(self.method());
        match self {
            Endpoint::Health => route.to(health_check),
            Endpoint::Register => route.to(register),
            Endpoint::Login => route.to(login),
            Endpoint::ListTasks => route.to(list_tasks),
            Endpoint::CreateTask => route.to(create_task),
            Endpoint::UpdateTask => route.to(update_task),
            Endpoint::DeleteTask => route.to(delete_task),
        }
    }

    pub fn resolve(method: &Method, path: &str) -> Option<Endpoint> {
        Self::ALL
            .into_iter()
            .find(|e| e.method() == *method && e.path() == path)
    }
}

/// Access required for a request; anything not in the table is protected.
pub fn access_for(method: &Method, path: &str) -> Access {
    Endpoint::resolve(method, path)
        .map(Endpoint::access)
        .unwrap_or(Access::Protected)
}

/// Registers every endpoint in the table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for endpoint in Endpoint::ALL {
        cfg.route(endpoint.path(), endpoint.route());
    }
}
