//! Flowest - dividend income planner
//!
//! This library aggregates simulated holdings into a blended dividend yield
//! and projects passive income month by month, with a thin client for the
//! Flowest backend (ticker catalog and saved simulations).

pub mod api;
pub mod config;
pub mod error;
pub mod reports;
pub mod simulator;
pub mod utils;
