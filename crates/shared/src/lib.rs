//! Shared types, errors, and configuration for Finwise.
//!
//! This crate provides common types used across all other crates:
//! - Money type with decimal precision
//! - Typed IDs for backend entity references
//! - Skip/limit pagination windows for list endpoints
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiConfig, AppConfig, LogConfig};
pub use error::{AppError, AppResult};
