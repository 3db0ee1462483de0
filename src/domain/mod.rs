//! Core domain types and logic.

pub mod series;
pub mod table;
pub mod filter;
pub mod stock;
pub mod holding;
pub mod transaction;
pub mod trade;
pub mod format;
pub mod config_validation;
pub mod error;
