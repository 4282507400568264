//! Reasoning provider HTTP client for Savium.
//!
//! Implements the core [`ReasoningProvider`](savium_core::advisor::ReasoningProvider)
//! port against a remote "best-effort JSON" endpoint. Responses are parsed
//! defensively: unknown fields are ignored, amounts are accepted as numbers
//! or numeric strings, and any transport or parse failure surfaces as an
//! [`AdvisorError`](savium_core::advisor::AdvisorError) for the caller's
//! local fallback to absorb.

pub mod client;

pub use client::HttpReasoningProvider;
