//! Reasoning provider types and port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from the reasoning provider. All of them are recovered by the
/// caller's local fallback; none escape a strategy.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Remote enrichment is turned off in configuration.
    #[error("Reasoning provider is disabled")]
    Disabled,

    /// No API credential is configured.
    #[error("Reasoning provider credential is missing")]
    MissingCredential,

    /// Transport-level failure (connect, timeout).
    #[error("Reasoning provider request failed: {0}")]
    Http(String),

    /// Non-success HTTP status.
    #[error("Reasoning provider returned status {0}")]
    Status(u16),

    /// Response body could not be understood.
    #[error("Reasoning provider response was malformed: {0}")]
    Malformed(String),
}

/// A request for the reasoning provider.
#[derive(Debug, Clone)]
pub struct AdvisorRequest {
    /// Natural-language prompt describing what to refine.
    pub prompt: String,
    /// Structured context (the strategy's measured numbers).
    pub context: serde_json::Value,
}

/// Best-effort parsed provider response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisorReply {
    /// Refined amount, when the provider proposed one.
    pub amount: Option<Decimal>,
    /// Phrased rationale, when the provider produced one.
    pub rationale: Option<String>,
}

/// Port for the reasoning provider.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Asks the provider for a refinement. Errors mean "use the local
    /// result instead"; they carry no further semantics.
    async fn advise(&self, request: &AdvisorRequest) -> Result<AdvisorReply, AdvisorError>;
}

/// A provider that always declines, for wiring without remote enrichment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProvider;

#[async_trait]
impl ReasoningProvider for DisabledProvider {
    async fn advise(&self, _request: &AdvisorRequest) -> Result<AdvisorReply, AdvisorError> {
        Err(AdvisorError::Disabled)
    }
}
