//! Recommendation data types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use savium_shared::types::{RecommendationId, UserId};

/// Default days until a recommendation expires.
pub const RECOMMENDATION_TTL_DAYS: i64 = 7;

/// What kind of analysis produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    /// Spending anomaly in a category.
    SpendingAnalysis,
    /// A goal's target looks unrealistic.
    GoalOptimization,
    /// A spending category lacks a budget.
    BudgetSuggestion,
    /// A debt payment opportunity.
    DebtReminder,
}

/// How urgently a recommendation should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationPriority {
    /// Surface prominently.
    High,
    /// Surface normally.
    Medium,
    /// Surface when convenient.
    Low,
}

/// User-driven lifecycle of a recommendation. Transitions never revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationStatus {
    /// Created, not yet seen.
    Pending,
    /// Seen by the user.
    Viewed,
    /// Dismissed without acting.
    Dismissed,
    /// The user followed the recommendation.
    Acted,
}

impl RecommendationStatus {
    /// Whether moving to `next` is a legal forward transition.
    ///
    /// Valid transitions:
    /// - Pending → Viewed | Dismissed | Acted
    /// - Viewed → Dismissed | Acted
    ///
    /// Dismissed and Acted are terminal.
    #[must_use]
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Pending,
                Self::Viewed | Self::Dismissed | Self::Acted
            ) | (Self::Viewed, Self::Dismissed | Self::Acted)
        )
    }
}

/// A deep-link action the user can take directly from a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickAction {
    /// Button label.
    pub label: String,
    /// In-app deep-link path.
    pub path: String,
    /// Fields to prefill at the destination.
    pub prefill: serde_json::Value,
}

/// Transient result of one strategy run; consumed by the orchestrator to
/// build a persisted recommendation. A strategy with nothing to say
/// returns no result at all.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Recommendation type to persist.
    pub recommendation_type: RecommendationType,
    /// Priority.
    pub priority: RecommendationPriority,
    /// Short title.
    pub title: String,
    /// Full description (provider-phrased or local fallback).
    pub description: String,
    /// The strategy's measured numbers.
    pub data: serde_json::Value,
    /// Whether quick actions are attached.
    pub actionable: bool,
    /// Quick actions.
    pub actions: Vec<QuickAction>,
}

/// A persisted, prioritized, actionable suggestion surfaced to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommendation ID.
    pub id: RecommendationId,
    /// Owning user.
    pub user_id: UserId,
    /// Type.
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    /// Priority.
    pub priority: RecommendationPriority,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Structured payload.
    pub data: serde_json::Value,
    /// Whether quick actions are attached.
    pub actionable: bool,
    /// Quick actions.
    pub actions: Vec<QuickAction>,
    /// Lifecycle status.
    pub status: RecommendationStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

impl Recommendation {
    /// Builds a pending recommendation from a strategy result.
    #[must_use]
    pub fn from_analysis(
        user_id: UserId,
        analysis: AnalysisResult,
        now: DateTime<Utc>,
        ttl_days: i64,
    ) -> Self {
        Self {
            id: RecommendationId::new(),
            user_id,
            recommendation_type: analysis.recommendation_type,
            priority: analysis.priority,
            title: analysis.title,
            description: analysis.description,
            data: analysis.data,
            actionable: analysis.actionable,
            actions: analysis.actions,
            status: RecommendationStatus::Pending,
            created_at: now,
            expires_at: now + Duration::days(ttl_days),
        }
    }
}
