//! Daily recommendation orchestration.
//!
//! Per user per day the pipeline moves through: not-eligible →
//! eligible-no-recent → generated | skipped. Any failure inside the
//! pipeline is caught at the top, logged, and collapses to "no
//! recommendation today" - one bad user never aborts the batch.
//!
//! The dedup check and the create are not transactional; concurrent
//! invocations for the same user can race. A single daily caller per
//! process is assumed.

use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use tracing::{debug, error, info, warn};

use savium_shared::types::UserId;
use savium_shared::AppResult;

use crate::notification::{NewNotification, NotificationCategory, NotificationService};

use super::repository::{RecommendationRepository, UserSettingsRepository};
use super::selector::StrategySelector;
use super::strategies::AnalysisStrategy;
use super::types::{Recommendation, RECOMMENDATION_TTL_DAYS};

/// Result of one daily batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOutcome {
    /// Users the batch looked at.
    pub considered: usize,
    /// Recommendations actually generated.
    pub generated: usize,
}

/// Orchestrates strategy selection, dedup, persistence, and notification.
pub struct RecommendationOrchestrator {
    users: Arc<dyn UserSettingsRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
    notifications: Arc<NotificationService>,
    selector: Arc<dyn StrategySelector>,
    strategies: Vec<Arc<dyn AnalysisStrategy>>,
    ttl_days: i64,
}

impl RecommendationOrchestrator {
    /// Creates an orchestrator over its ports and strategy set.
    pub fn new(
        users: Arc<dyn UserSettingsRepository>,
        recommendations: Arc<dyn RecommendationRepository>,
        notifications: Arc<NotificationService>,
        selector: Arc<dyn StrategySelector>,
        strategies: Vec<Arc<dyn AnalysisStrategy>>,
    ) -> Self {
        Self {
            users,
            recommendations,
            notifications,
            selector,
            strategies,
            ttl_days: RECOMMENDATION_TTL_DAYS,
        }
    }

    /// Overrides the recommendation expiry window.
    #[must_use]
    pub fn with_ttl_days(mut self, ttl_days: i64) -> Self {
        self.ttl_days = ttl_days;
        self
    }

    /// Runs the full per-user pipeline, swallowing any failure.
    ///
    /// Returns the persisted recommendation, or `None` when the user is
    /// not opted in, already has one today, the selected strategy found
    /// nothing, or anything went wrong along the way.
    pub async fn generate_daily_recommendation(&self, user_id: UserId) -> Option<Recommendation> {
        match self.try_generate(user_id).await {
            Ok(result) => result,
            Err(err) => {
                error!(
                    user_id = %user_id,
                    code = err.error_code(),
                    error = %err,
                    "daily recommendation pipeline failed"
                );
                None
            }
        }
    }

    async fn try_generate(&self, user_id: UserId) -> AppResult<Option<Recommendation>> {
        if !self.users.recommendations_enabled(user_id).await? {
            debug!(user_id = %user_id, "user not opted in to recommendations");
            return Ok(None);
        }

        // At most one PENDING recommendation per user per calendar day.
        let start_of_day = Utc::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        let recent = self
            .recommendations
            .find_pending_since(user_id, start_of_day)
            .await?;
        if !recent.is_empty() {
            debug!(user_id = %user_id, "recommendation already generated today");
            return Ok(None);
        }

        if self.strategies.is_empty() {
            return Ok(None);
        }
        let strategy = &self.strategies[self.selector.select(self.strategies.len())];
        debug!(user_id = %user_id, strategy = strategy.kind().label(), "strategy selected");

        let Some(analysis) = strategy.analyze(user_id).await? else {
            debug!(user_id = %user_id, "strategy found nothing to recommend");
            return Ok(None);
        };

        let recommendation =
            Recommendation::from_analysis(user_id, analysis, Utc::now(), self.ttl_days);
        let stored = self.recommendations.create(recommendation).await?;

        // Notification hand-off is best-effort: the recommendation stays
        // persisted even when this fails.
        let notification = NewNotification {
            user_id,
            title: stored.title.clone(),
            subtitle: Some(strategy.kind().label().to_string()),
            body: stored.description.clone(),
            category: NotificationCategory::Recommendation,
            send_email: false,
            expires_at: Some(stored.expires_at),
        };
        if let Err(err) = self.notifications.notify(notification).await {
            warn!(
                user_id = %user_id,
                recommendation_id = %stored.id,
                error = %err,
                "recommendation notification hand-off failed"
            );
        }

        info!(
            user_id = %user_id,
            recommendation_id = %stored.id,
            strategy = strategy.kind().label(),
            priority = ?stored.priority,
            "daily recommendation generated"
        );
        Ok(Some(stored))
    }

    /// Generates recommendations for every candidate user, sequentially.
    ///
    /// Sequential awaiting bounds resource usage; a slow provider call for
    /// one user delays the rest rather than fanning out.
    pub async fn run_daily_batch(&self) -> BatchOutcome {
        let candidates = match self.users.list_recommendation_candidates().await {
            Ok(users) => users,
            Err(err) => {
                error!(error = %err, "could not list recommendation candidates");
                return BatchOutcome::default();
            }
        };

        let mut generated = 0;
        for user_id in &candidates {
            if self.generate_daily_recommendation(*user_id).await.is_some() {
                generated += 1;
            }
        }

        let outcome = BatchOutcome {
            considered: candidates.len(),
            generated,
        };
        info!(
            considered = outcome.considered,
            generated = outcome.generated,
            "daily recommendation batch finished"
        );
        outcome
    }
}
