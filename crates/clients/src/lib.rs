//! Clients domain module (registration and the daily transaction governor).
//!
//! Deterministic domain logic only (no IO, no storage).

pub mod activity;
pub mod client;

pub use activity::{DailyActivity, DailyTally};
pub use client::{Client, DailyLimits, RegisterClient};
