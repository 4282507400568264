//! Core planning and recommendation logic for Savium.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence and delivery are expressed as async ports that the outer layers
//! implement; everything algorithmic lives here.
//!
//! # Modules
//!
//! - `goal` - Savings goals, contribution schedules, and per-goal suggestions
//! - `finance` - Transaction/budget/debt collaborator types and ports
//! - `notification` - Durable notification records and their port
//! - `advisor` - Reasoning provider port (remote enrichment, local fallback)
//! - `recommendation` - Analysis strategies and the daily orchestrator

pub mod advisor;
pub mod finance;
pub mod goal;
pub mod notification;
pub mod recommendation;

#[cfg(test)]
pub(crate) mod test_support;
