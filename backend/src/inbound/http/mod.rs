//! HTTP inbound adapter exposing REST endpoints.

pub mod bills;
pub mod documents;
pub mod error;
pub mod finance;
pub mod health;
pub mod households;
pub mod insurance;
pub mod maintenance;
pub mod meals;
pub mod plants;
pub mod reading;
pub mod reminders;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod snippets;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod vehicles;

pub use crate::domain::ApiResult;
