//! Database module for the task server
//!
//! This module defines the persistence interfaces and their PostgreSQL and
//! in-memory implementations.

pub mod memory;
pub mod models;
pub mod operations;
pub mod store;

pub use memory::MemoryStore;
pub use models::{NewTask, NewUser, Priority, Task, TaskChanges, User};
pub use operations::DbOperations;
pub use store::{OrderDirection, OrderField, TaskListQuery, TaskStore, UserStore, PAGE_SIZE};
