//! Parsing of `GET /task` query parameters.
//!
//! Parameters arrive as raw strings so that bad values produce the
//! uniform error envelope rather than the framework's default rejection.

use serde::Deserialize;

use crate::db::store::{OrderDirection, OrderField, TaskListQuery};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub order_field: Option<String>,
    pub order_direction: Option<String>,
}

impl ListParams {
    pub fn parse(&self) -> Result<TaskListQuery, AppError> {
        let page = match self.page.as_deref() {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| AppError::ValidationError(format!("Invalid page: {}", raw)))?,
        };

        let order_field = match self.order_field.as_deref() {
            None | Some("") => OrderField::default(),
            Some(raw) => OrderField::ALL
                .into_iter()
                .find(|field| field.api_name() == raw)
                .ok_or_else(|| AppError::ValidationError(format!("Invalid order_field: {}", raw)))?,
        };

        let order_direction = match self.order_direction.as_deref() {
            None | Some("") => OrderDirection::default(),
            Some(raw) if raw.eq_ignore_ascii_case("asc") => OrderDirection::Asc,
            Some(raw) if raw.eq_ignore_ascii_case("desc") => OrderDirection::Desc,
            Some(raw) => {
                return Err(AppError::ValidationError(format!("Invalid order_direction: {}", raw)))
            }
        };

        Ok(TaskListQuery {
            page,
            order_field,
            order_direction,
        })
    }
}
