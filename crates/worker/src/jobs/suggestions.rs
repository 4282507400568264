//! Per-goal suggestion sweep job.

use std::sync::Arc;

use tracing::{error, info};

use savium_core::goal::{GoalRepository, SuggestionEngine};

use crate::guard::JobGuard;

/// Runs the suggestion engine across every active goal.
pub struct GoalSuggestionJob {
    goals: Arc<dyn GoalRepository>,
    engine: Arc<SuggestionEngine>,
    guard: JobGuard,
}

impl GoalSuggestionJob {
    /// Creates the job.
    #[must_use]
    pub fn new(goals: Arc<dyn GoalRepository>, engine: Arc<SuggestionEngine>) -> Self {
        Self {
            goals,
            engine,
            guard: JobGuard::new("goal_suggestions"),
        }
    }

    /// Sweeps all active goals; a failing goal is logged and skipped.
    pub async fn run(&self) {
        let Some(_permit) = self.guard.try_acquire() else {
            return;
        };

        let goals = match self.goals.list_active().await {
            Ok(goals) => goals,
            Err(err) => {
                error!(error = %err, "could not list active goals for suggestion sweep");
                return;
            }
        };

        let total = goals.len();
        let mut failed = 0usize;
        for goal in goals {
            if let Err(err) = self.engine.run_all(&goal).await {
                failed += 1;
                error!(goal_id = %goal.id, error = %err, "suggestion checks failed for goal");
            }
        }
        info!(total, failed, "goal suggestion sweep done");
    }
}
