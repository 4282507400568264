//! Contribution schedule generation and recalculation.
//!
//! The generator projects a sequence of future installments for a goal;
//! the recalculator re-spreads the remaining amount over the entries that
//! are still pending. Neither step is transactional with respect to
//! concurrent contributions - a single caller per goal is assumed.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use savium_shared::AppResult;

use super::repository::GoalScheduleRepository;
use super::types::{Goal, GoalContribution, NewScheduleEntry, PlannedInstallment};

/// Computes the installment plan for a goal as of `today`.
///
/// Returns an empty plan (a no-op, not an error) when the goal is already
/// met, the end date has arrived, or the frequency leaves no room for a
/// single installment. Dates step by the contribution frequency starting
/// from `today`; every date stays on or before the end date.
///
/// The per-installment amount is the goal's explicit contribution amount
/// when set and positive, otherwise `ceil(remaining / installments)` so
/// the plan always covers the remainder despite rounding.
#[must_use]
pub fn plan_installments(goal: &Goal, today: NaiveDate) -> Vec<PlannedInstallment> {
    let remaining = goal.remaining_amount();
    if remaining <= Decimal::ZERO || today >= goal.end_date {
        return Vec::new();
    }

    let days_remaining = goal.days_remaining(today);
    let frequency = i64::from(goal.contribution_frequency_days.unwrap_or(1).max(1));
    let possible_installments = days_remaining / frequency;
    if possible_installments <= 0 {
        return Vec::new();
    }

    let amount = goal.fixed_installment_amount().unwrap_or_else(|| {
        (remaining / Decimal::from(possible_installments)).ceil()
    });

    let mut installments = Vec::with_capacity(usize::try_from(possible_installments).unwrap_or(0));
    let mut date = today;
    for _ in 0..possible_installments {
        date += Duration::days(frequency);
        if date > goal.end_date {
            break;
        }
        installments.push(PlannedInstallment { date, amount });
    }
    installments
}

/// Service that maintains a goal's contribution schedule.
pub struct SchedulePlanner {
    schedules: Arc<dyn GoalScheduleRepository>,
}

impl SchedulePlanner {
    /// Creates a new planner over the schedule port.
    pub fn new(schedules: Arc<dyn GoalScheduleRepository>) -> Self {
        Self { schedules }
    }

    /// Projects and persists the installment plan for a goal.
    ///
    /// Returns the number of entries written; zero when there is nothing
    /// to plan.
    pub async fn generate_schedules(&self, goal: &Goal) -> AppResult<usize> {
        let planned = plan_installments(goal, Utc::now().date_naive());
        if planned.is_empty() {
            debug!(goal_id = %goal.id, "no installments to plan");
            return Ok(0);
        }

        let entries: Vec<NewScheduleEntry> = planned
            .into_iter()
            .map(|installment| NewScheduleEntry {
                goal_id: goal.id,
                user_id: goal.owner_id,
                scheduled_date: installment.date,
                amount: installment.amount,
            })
            .collect();

        let written = self.schedules.create_many(entries).await?;
        info!(goal_id = %goal.id, entries = written, "generated contribution schedule");
        Ok(written)
    }

    /// Re-spreads the remaining amount over the goal's pending entries.
    ///
    /// With no pending entries left this defers entirely to
    /// [`Self::generate_schedules`]. With the goal already satisfied it is
    /// a no-op. Otherwise every pending entry's amount becomes
    /// `ceil(remaining / pending_count)`; dates are never touched.
    pub async fn recalculate_schedules(&self, goal: &Goal) -> AppResult<()> {
        let existing = self.schedules.list_for_goal(goal.id).await?;
        let pending: Vec<_> = existing.into_iter().filter(|e| e.is_pending()).collect();

        if pending.is_empty() {
            self.generate_schedules(goal).await?;
            return Ok(());
        }

        let remaining = goal.remaining_amount();
        if remaining <= Decimal::ZERO {
            debug!(goal_id = %goal.id, "goal satisfied, leaving pending entries untouched");
            return Ok(());
        }

        let new_amount = (remaining / Decimal::from(pending.len())).ceil();
        for entry in &pending {
            self.schedules.update_amount(entry.id, new_amount).await?;
        }
        info!(
            goal_id = %goal.id,
            entries = pending.len(),
            amount = %new_amount,
            "recalculated pending schedule amounts"
        );
        Ok(())
    }

    /// Completes the earliest pending entry for a fresh contribution and
    /// re-spreads the rest.
    ///
    /// The entry keeps its planned date; the contribution is linked for
    /// traceability. Goals without pending entries only get the
    /// recalculation (which may regenerate the plan).
    pub async fn record_contribution(
        &self,
        goal: &Goal,
        contribution: &GoalContribution,
    ) -> AppResult<()> {
        let existing = self.schedules.list_for_goal(goal.id).await?;
        let earliest_pending = existing
            .iter()
            .filter(|e| e.is_pending())
            .min_by_key(|e| e.scheduled_date);

        if let Some(entry) = earliest_pending {
            self.schedules
                .mark_completed(entry.id, contribution.id)
                .await?;
            debug!(
                goal_id = %goal.id,
                entry_id = %entry.id,
                contribution_id = %contribution.id,
                "completed schedule entry"
            );
        }

        self.recalculate_schedules(goal).await
    }
}
