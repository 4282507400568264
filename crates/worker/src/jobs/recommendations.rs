//! Daily recommendation batch job.

use std::sync::Arc;

use tracing::info;

use savium_core::recommendation::RecommendationOrchestrator;

use crate::guard::JobGuard;

/// Runs the daily recommendation batch over all candidate users.
pub struct DailyRecommendationJob {
    orchestrator: Arc<RecommendationOrchestrator>,
    guard: JobGuard,
}

impl DailyRecommendationJob {
    /// Creates the job.
    #[must_use]
    pub fn new(orchestrator: Arc<RecommendationOrchestrator>) -> Self {
        Self {
            orchestrator,
            guard: JobGuard::new("daily_recommendations"),
        }
    }

    /// Runs one batch; skips silently when the previous run is still in
    /// flight.
    pub async fn run(&self) {
        let Some(_permit) = self.guard.try_acquire() else {
            return;
        };

        info!("daily recommendation batch starting");
        let outcome = self.orchestrator.run_daily_batch().await;
        info!(
            considered = outcome.considered,
            generated = outcome.generated,
            "daily recommendation batch done"
        );
    }
}
