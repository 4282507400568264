//! Scheduled background jobs for Savium.
//!
//! This crate wires the core services to wall-clock cron schedules:
//! - The daily recommendation batch
//! - The periodic per-goal suggestion sweep
//! - The schedule upkeep sweep
//! - Expired notification/recommendation cleanup
//!
//! Every job runs behind a same-process re-entrancy guard and never
//! propagates errors to the scheduler.

pub mod guard;
pub mod jobs;
pub mod scheduler;

pub use guard::JobGuard;
pub use scheduler::WorkerScheduler;
