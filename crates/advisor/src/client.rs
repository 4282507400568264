//! HTTP client for the reasoning provider.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use savium_core::advisor::{AdvisorError, AdvisorReply, AdvisorRequest, ReasoningProvider};
use savium_shared::config::AdvisorConfig;

/// Reasoning provider backed by a remote HTTP endpoint.
pub struct HttpReasoningProvider {
    http: reqwest::Client,
    config: AdvisorConfig,
}

impl HttpReasoningProvider {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Http` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Http(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl ReasoningProvider for HttpReasoningProvider {
    async fn advise(&self, request: &AdvisorRequest) -> Result<AdvisorReply, AdvisorError> {
        if !self.config.enabled {
            return Err(AdvisorError::Disabled);
        }
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AdvisorError::MissingCredential)?;

        let body = json!({
            "model": self.config.model,
            "prompt": request.prompt,
            "context": request.context,
        });

        let response = self
            .http
            .post(&self.config.base_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status.as_u16()));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::Malformed(e.to_string()))?;
        let reply = parse_reply(&value);
        debug!(
            has_amount = reply.amount.is_some(),
            has_rationale = reply.rationale.is_some(),
            "reasoning provider replied"
        );
        Ok(reply)
    }
}

/// Best-effort extraction of a suggestion from provider JSON.
///
/// The contract is loose by design: the amount may live under several
/// keys and arrive as a number or a numeric string; the rationale may be
/// under `rationale`, `description`, or `suggestion`. Anything that does
/// not parse is simply absent from the reply.
fn parse_reply(value: &Value) -> AdvisorReply {
    let amount = ["amount", "suggested_amount", "suggestedAmount", "value"]
        .iter()
        .find_map(|key| parse_amount(value.get(*key)?));
    let rationale = ["rationale", "description", "suggestion", "message"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);

    AdvisorReply { amount, rationale }
}

fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
