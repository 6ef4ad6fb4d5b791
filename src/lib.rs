//! Mock classroom attendance backend.
//!
//! Serves a teacher's class allocations, per-allocation rosters and the
//! simulated logged-in user from a single JSON document, and records
//! attendance submissions by appending to that document and rewriting it.

pub mod api;
pub mod config;
pub mod models;
pub mod store;
