//! Shift Compliance Engine
//!
//! This crate evaluates proposed shift assignments against labor agreement
//! rules (weekly and monthly hour caps, daily overtime, night and Saturday
//! classification, double-booking) before the surrounding application commits
//! them, and constructs the override records that let privileged actors accept
//! policy violations.

#![warn(missing_docs)]

pub mod api;
pub mod compliance;
pub mod config;
pub mod error;
pub mod models;
