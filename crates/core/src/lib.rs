//! Core budget logic for Finwise.
//!
//! This crate contains the budget wizard with ZERO HTTP dependencies.
//! The backend is reached through the `BudgetGateway` trait, which the
//! client crate implements.
//!
//! # Modules
//!
//! - `budget` - Drafts, allocation totals, and the submission sequencer
//! - `wizard` - The two-step creation wizard and its alerts

pub mod budget;
pub mod wizard;
