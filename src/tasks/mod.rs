//! Owner-scoped task CRUD behind the auth middleware.

pub mod handlers;
pub mod query;
