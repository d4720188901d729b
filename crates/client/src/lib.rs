//! HTTP client for the Finwise budget REST API.
//!
//! This crate provides:
//! - `ApiClient` with bearer-token auth and a session-expiry hook
//! - Category and budget endpoints
//! - A `BudgetGateway` implementation for the budget wizard

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod error;
pub mod gateway;
pub mod http;

pub use auth::{SessionToken, TokenProvider, UnauthorizedHook};
pub use budgets::{BudgetFilter, BudgetSummary, CategoryVsActual};
pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, ApiClientConfig};
