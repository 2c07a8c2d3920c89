//! Core domain types and logic.

pub mod trade;
pub mod validation;
pub mod journal;
pub mod statistics;
pub mod error;
