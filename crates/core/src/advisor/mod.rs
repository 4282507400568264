//! Reasoning provider port.
//!
//! Strategies may ask an external reasoning provider to phrase a rationale
//! or refine a suggested amount. The provider is strictly an enrichment:
//! every caller computes a deterministic local result first and keeps it
//! when the provider is unavailable, misconfigured, or returns junk.

pub mod types;

pub use types::{AdvisorError, AdvisorReply, AdvisorRequest, DisabledProvider, ReasoningProvider};
