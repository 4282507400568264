//! Recommendation and user-settings ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use savium_shared::types::UserId;
use savium_shared::AppResult;

use super::types::Recommendation;

/// Port for recommendation persistence.
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Durably creates a recommendation.
    async fn create(&self, recommendation: Recommendation) -> AppResult<Recommendation>;

    /// Lists a user's PENDING recommendations created at or after the
    /// given instant. Used for the per-day dedup check.
    async fn find_pending_since(
        &self,
        user_id: UserId,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Recommendation>>;

    /// Deletes recommendations whose expiry has passed. Returns the
    /// number of rows removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Port for per-user recommendation settings.
#[async_trait]
pub trait UserSettingsRepository: Send + Sync {
    /// Whether the user has opted in to daily recommendations.
    async fn recommendations_enabled(&self, user_id: UserId) -> AppResult<bool>;

    /// Users the daily batch should consider.
    async fn list_recommendation_candidates(&self) -> AppResult<Vec<UserId>>;
}
