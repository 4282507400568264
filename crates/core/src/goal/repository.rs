//! Repository ports for goals, contributions, and schedules.
//!
//! Implemented by the persistence layer; the core only depends on these
//! traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use savium_shared::types::{ContributionId, GoalId, ScheduleEntryId, UserId};
use savium_shared::AppResult;

use super::types::{Goal, GoalContribution, GoalContributionSchedule, NewScheduleEntry};

/// Port for goal lookups.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Finds a goal by ID.
    async fn find_by_id(&self, id: GoalId) -> AppResult<Option<Goal>>;

    /// Lists all goals whose end date has not passed.
    async fn list_active(&self) -> AppResult<Vec<Goal>>;

    /// Lists active goals owned by the given user.
    async fn list_active_for_user(&self, user_id: UserId) -> AppResult<Vec<Goal>>;
}

/// Port for contribution history lookups.
#[async_trait]
pub trait GoalContributionRepository: Send + Sync {
    /// Lists every contribution for a goal, ordered by date ascending.
    async fn list_for_goal(&self, goal_id: GoalId) -> AppResult<Vec<GoalContribution>>;

    /// Finds the most recent contribution for a goal.
    async fn find_latest(&self, goal_id: GoalId) -> AppResult<Option<GoalContribution>>;
}

/// Port for contribution schedule persistence.
#[async_trait]
pub trait GoalScheduleRepository: Send + Sync {
    /// Lists every schedule entry for a goal, ordered by scheduled date.
    async fn list_for_goal(&self, goal_id: GoalId) -> AppResult<Vec<GoalContributionSchedule>>;

    /// Persists newly planned entries with status `Pending`. Returns the
    /// number of rows written.
    async fn create_many(&self, entries: Vec<NewScheduleEntry>) -> AppResult<usize>;

    /// Overwrites the amount of a pending entry.
    async fn update_amount(&self, entry_id: ScheduleEntryId, amount: Decimal) -> AppResult<()>;

    /// Marks a pending entry completed, linking the fulfilling contribution.
    async fn mark_completed(
        &self,
        entry_id: ScheduleEntryId,
        contribution_id: ContributionId,
    ) -> AppResult<()>;
}
