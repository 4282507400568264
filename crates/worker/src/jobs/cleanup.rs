//! Expired notification and recommendation cleanup job.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use savium_core::notification::NotificationRepository;
use savium_core::recommendation::RecommendationRepository;

use crate::guard::JobGuard;

/// Deletes notifications and recommendations whose expiry has passed.
pub struct CleanupJob {
    notifications: Arc<dyn NotificationRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
    guard: JobGuard,
}

impl CleanupJob {
    /// Creates the job.
    #[must_use]
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        recommendations: Arc<dyn RecommendationRepository>,
    ) -> Self {
        Self {
            notifications,
            recommendations,
            guard: JobGuard::new("expiry_cleanup"),
        }
    }

    /// Runs one cleanup pass.
    pub async fn run(&self) {
        let Some(_permit) = self.guard.try_acquire() else {
            return;
        };

        let now = Utc::now();
        let notifications_removed = match self.notifications.delete_expired(now).await {
            Ok(count) => count,
            Err(err) => {
                error!(error = %err, "expired notification cleanup failed");
                0
            }
        };
        let recommendations_removed = match self.recommendations.delete_expired(now).await {
            Ok(count) => count,
            Err(err) => {
                error!(error = %err, "expired recommendation cleanup failed");
                0
            }
        };

        info!(
            notifications_removed,
            recommendations_removed, "expiry cleanup done"
        );
    }
}
