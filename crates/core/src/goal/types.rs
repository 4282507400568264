//! Goal and contribution schedule data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use savium_shared::types::{ContributionId, GoalId, ScheduleEntryId, UserId};

/// A savings goal with a deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Goal ID.
    pub id: GoalId,
    /// User who owns the goal.
    pub owner_id: UserId,
    /// Optional shared co-owner; receives parallel notifications but does
    /// not own the row.
    pub co_owner_id: Option<UserId>,
    /// Goal name.
    pub name: String,
    /// Amount to save by the end date.
    pub target_amount: Decimal,
    /// Amount saved so far.
    pub current_amount: Decimal,
    /// Deadline for reaching the target.
    pub end_date: NaiveDate,
    /// Days between planned contributions; absent means daily.
    pub contribution_frequency_days: Option<u32>,
    /// Fixed per-installment amount; absent or zero means auto-computed.
    pub contribution_amount: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Amount still needed to reach the target. May be negative when the
    /// goal is overfunded.
    #[must_use]
    pub fn remaining_amount(&self) -> Decimal {
        self.target_amount - self.current_amount
    }

    /// Returns true once the target has been reached or exceeded.
    #[must_use]
    pub fn is_met(&self) -> bool {
        self.remaining_amount() <= Decimal::ZERO
    }

    /// Whole days from `today` until the end date (negative when past due).
    #[must_use]
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days()
    }

    /// The explicit per-installment amount, if one is set and positive.
    /// A stored zero means "auto".
    #[must_use]
    pub fn fixed_installment_amount(&self) -> Option<Decimal> {
        self.contribution_amount.filter(|a| *a > Decimal::ZERO)
    }

    /// Everyone who should hear about this goal: the owner plus the
    /// co-owner when one is set.
    #[must_use]
    pub fn members(&self) -> Vec<UserId> {
        let mut members = vec![self.owner_id];
        if let Some(co_owner) = self.co_owner_id {
            members.push(co_owner);
        }
        members
    }
}

/// A recorded contribution toward a goal. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalContribution {
    /// Contribution ID.
    pub id: ContributionId,
    /// Goal this contribution belongs to.
    pub goal_id: GoalId,
    /// User who contributed.
    pub user_id: UserId,
    /// Contributed amount.
    pub amount: Decimal,
    /// Date of the contribution.
    pub date: NaiveDate,
}

/// Lifecycle status of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Waiting for a matching contribution.
    Pending,
    /// Fulfilled by a contribution.
    Completed,
    /// Skipped by the user.
    Skipped,
}

/// A planned future contribution toward a goal.
///
/// Created by the schedule generator with status `Pending`; the amount is
/// mutated only by recalculation and only while still pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalContributionSchedule {
    /// Schedule entry ID.
    pub id: ScheduleEntryId,
    /// Goal this entry belongs to.
    pub goal_id: GoalId,
    /// User the entry was planned for.
    pub user_id: UserId,
    /// Date the contribution is due.
    pub scheduled_date: NaiveDate,
    /// Planned amount.
    pub amount: Decimal,
    /// Current lifecycle status.
    pub status: ScheduleStatus,
    /// Contribution that fulfilled this entry, once completed.
    pub contribution_id: Option<ContributionId>,
}

impl GoalContributionSchedule {
    /// Returns true while the entry is still open for recalculation.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ScheduleStatus::Pending
    }
}

/// Input for persisting a newly planned schedule entry.
#[derive(Debug, Clone)]
pub struct NewScheduleEntry {
    /// Goal the entry belongs to.
    pub goal_id: GoalId,
    /// User the entry is planned for.
    pub user_id: UserId,
    /// Date the contribution is due.
    pub scheduled_date: NaiveDate,
    /// Planned amount.
    pub amount: Decimal,
}

/// A date/amount pair produced by the schedule generator before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInstallment {
    /// Date the contribution is due.
    pub date: NaiveDate,
    /// Planned amount.
    pub amount: Decimal,
}
