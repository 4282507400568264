//! Schedule upkeep sweep job.

use std::sync::Arc;

use tracing::{error, info};

use savium_core::goal::{GoalRepository, SchedulePlanner};

use crate::guard::JobGuard;

/// Re-spreads pending installments across every active goal so plans
/// track progress made since they were generated.
pub struct ScheduleUpkeepJob {
    goals: Arc<dyn GoalRepository>,
    planner: Arc<SchedulePlanner>,
    guard: JobGuard,
}

impl ScheduleUpkeepJob {
    /// Creates the job.
    #[must_use]
    pub fn new(goals: Arc<dyn GoalRepository>, planner: Arc<SchedulePlanner>) -> Self {
        Self {
            goals,
            planner,
            guard: JobGuard::new("schedule_upkeep"),
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
                error!(error = %err, "could not list active goals for schedule upkeep");
                return;
            }
        };

        let total = goals.len();
        let mut failed = 0usize;
        for goal in goals {
            if let Err(err) = self.planner.recalculate_schedules(&goal).await {
                failed += 1;
                error!(goal_id = %goal.id, error = %err, "schedule recalculation failed");
            }
        }
        info!(total, failed, "schedule upkeep sweep done");
    }
}
