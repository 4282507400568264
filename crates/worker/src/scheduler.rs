//! Cron scheduler for the background jobs.
//!
//! Schedules are wall-clock cron expressions, so a process restart loses
//! at most one tick instead of drifting.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::info;

use savium_shared::config::SchedulerConfig;
use savium_shared::AppError;

use crate::jobs::{CleanupJob, DailyRecommendationJob, GoalSuggestionJob, ScheduleUpkeepJob};

/// Cron-based scheduler for the Savium background jobs.
pub struct WorkerScheduler {
    scheduler: JobScheduler,
    config: SchedulerConfig,
}

impl std::fmt::Debug for WorkerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerScheduler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WorkerScheduler {
    /// Creates a new scheduler with the given cron configuration.
    pub async fn new(config: SchedulerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create scheduler: {e}")))?;
        Ok(Self { scheduler, config })
    }

    /// Registers all four jobs on their configured schedules.
    pub async fn register_all(
        &self,
        recommendations: Arc<DailyRecommendationJob>,
        suggestions: Arc<GoalSuggestionJob>,
        upkeep: Arc<ScheduleUpkeepJob>,
        cleanup: Arc<CleanupJob>,
    ) -> Result<(), AppError> {
        let cron = self.config.recommendation_cron.clone();
        self.register("daily_recommendations", &cron, move || {
            let job = Arc::clone(&recommendations);
            async move { job.run().await }
        })
        .await?;

        let cron = self.config.suggestion_cron.clone();
        self.register("goal_suggestions", &cron, move || {
            let job = Arc::clone(&suggestions);
            async move { job.run().await }
        })
        .await?;

        let cron = self.config.upkeep_cron.clone();
        self.register("schedule_upkeep", &cron, move || {
            let job = Arc::clone(&upkeep);
            async move { job.run().await }
        })
        .await?;

        let cron = self.config.cleanup_cron.clone();
        self.register("expiry_cleanup", &cron, move || {
            let job = Arc::clone(&cleanup);
            async move { job.run().await }
        })
        .await?;

        info!("all scheduled jobs registered");
        Ok(())
    }

    async fn register<F, Fut>(
        &self,
        name: &'static str,
        cron: &str,
        run: F,
    ) -> Result<(), AppError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job = CronJob::new_async(cron, move |_uuid, _lock| Box::pin(run()))
            .map_err(|e| AppError::Internal(format!("Failed to create {name} schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to add {name} schedule: {e}")))?;

        info!(job = name, cron, "registered scheduled job");
        Ok(())
    }

    /// Starts the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start scheduler: {e}")))?;

        info!("worker scheduler started");
        Ok(())
    }

    /// Shuts the scheduler down.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("worker scheduler shut down");
        Ok(())
    }
}
