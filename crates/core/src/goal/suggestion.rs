//! Per-goal saving suggestions and health checks.
//!
//! Four independent checks, each a pure evaluation over current state plus
//! a notifying wrapper. The checks never mutate the goal or its schedule,
//! so they are safe to run on every sweep; re-emitting the same suggestion
//! on a later sweep is accepted behavior.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use savium_shared::AppResult;

use crate::notification::{NotificationCategory, NotificationDraft, NotificationService};

use super::repository::GoalContributionRepository;
use super::types::{Goal, GoalContribution};

/// A goal is flagged at risk when the required weekly rate has more than
/// doubled since creation.
const RISK_RATE_MULTIPLIER: Decimal = Decimal::TWO;

/// Days of silence before a goal counts as inactive.
const INACTIVITY_THRESHOLD_DAYS: i64 = 7;

/// Minimum history needed to classify a saving cadence.
const OPTIMIZATION_MIN_CONTRIBUTIONS: usize = 3;

/// Observed saving cadence, classified from the average gap between
/// contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingCadence {
    /// Average gap of at most 9 days.
    Weekly,
    /// Average gap of at most 20 days.
    Biweekly,
    /// Anything slower.
    Monthly,
}

impl SavingCadence {
    /// Classifies a cadence from the average gap between contributions.
    #[must_use]
    pub fn from_average_gap(gap_days: Decimal) -> Self {
        if gap_days <= Decimal::from(9) {
            Self::Weekly
        } else if gap_days <= Decimal::from(20) {
            Self::Biweekly
        } else {
            Self::Monthly
        }
    }

    /// The nominal period the cadence is normalized to.
    #[must_use]
    pub const fn period_days(self) -> Decimal {
        match self {
            Self::Weekly => Decimal::from_parts(7, 0, 0, false, 0),
            Self::Biweekly => Decimal::from_parts(15, 0, 0, false, 0),
            Self::Monthly => Decimal::from_parts(30, 0, 0, false, 0),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Result of the weekly-saving evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySavingSuggestion {
    /// Weeks left until the end date (at least one).
    pub weeks_remaining: i64,
    /// Amount to save per week to stay on track.
    pub weekly_amount: Decimal,
    /// Equivalent monthly amount.
    pub monthly_amount: Decimal,
}

/// Result of the at-risk evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Weekly rate that was required when the goal was created.
    pub original_weekly_rate: Decimal,
    /// Weekly rate required from today.
    pub current_weekly_rate: Decimal,
    /// True when the current rate strictly exceeds twice the original.
    pub at_risk: bool,
}

/// Which inactivity path fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InactivityFinding {
    /// The goal has never received a contribution.
    NeverContributed {
        /// Days since the goal was created.
        days_since_creation: i64,
    },
    /// Contributions exist but the latest is stale.
    Stale {
        /// Days since the most recent contribution.
        days_since_last: i64,
    },
}

/// Result of the pattern-based optimization evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedSavingPlan {
    /// Classified cadence.
    pub cadence: SavingCadence,
    /// Average contribution amount over the history.
    pub average_amount: Decimal,
    /// Average gap between contributions, in days.
    pub average_gap_days: Decimal,
    /// Amount suggested per cadence period.
    pub suggested_amount: Decimal,
}

/// Computes the weekly/monthly amounts needed to stay on track.
///
/// Returns `None` when the goal is met or its end date has arrived.
#[must_use]
pub fn evaluate_weekly_saving(goal: &Goal, today: NaiveDate) -> Option<WeeklySavingSuggestion> {
    let remaining = goal.remaining_amount();
    if remaining <= Decimal::ZERO {
        return None;
    }
    let days_remaining = goal.days_remaining(today);
    if days_remaining <= 0 {
        return None;
    }

    // Ceiling division; never below one week.
    let weeks_remaining = ((days_remaining + 6) / 7).max(1);
    let weekly_amount = (remaining / Decimal::from(weeks_remaining)).round_dp(2);
    let monthly_amount =
        (remaining / Decimal::from(days_remaining) * Decimal::from(30)).round_dp(2);

    Some(WeeklySavingSuggestion {
        weeks_remaining,
        weekly_amount,
        monthly_amount,
    })
}

/// Compares the weekly rate required today against the rate required at
/// creation time.
///
/// The comparison is strict: a rate of exactly twice the original does not
/// flag. Returns `None` when the goal is met, past due, or was created on
/// or after its end date (no original window to compare against).
#[must_use]
pub fn evaluate_goal_risk(goal: &Goal, today: NaiveDate) -> Option<RiskAssessment> {
    let remaining = goal.remaining_amount();
    if remaining <= Decimal::ZERO {
        return None;
    }
    let total_days = (goal.end_date - goal.created_at.date_naive()).num_days();
    let days_left = goal.days_remaining(today);
    if total_days <= 0 || days_left <= 0 {
        return None;
    }

    let seven = Decimal::from(7);
    let original_weekly_rate = goal.target_amount * seven / Decimal::from(total_days);
    let current_weekly_rate = remaining * seven / Decimal::from(days_left);
    let at_risk = current_weekly_rate > original_weekly_rate * RISK_RATE_MULTIPLIER;

    Some(RiskAssessment {
        original_weekly_rate: original_weekly_rate.round_dp(2),
        current_weekly_rate: current_weekly_rate.round_dp(2),
        at_risk,
    })
}

/// Checks whether a goal has gone quiet.
///
/// Exactly one of the two paths can fire per call: a goal with no
/// contributions at all warns once it is at least a week old; otherwise
/// the latest contribution must be no more than a week old.
#[must_use]
pub fn evaluate_inactivity(
    goal: &Goal,
    latest: Option<&GoalContribution>,
    today: NaiveDate,
) -> Option<InactivityFinding> {
    match latest {
        None => {
            let days_since_creation = (today - goal.created_at.date_naive()).num_days();
            (days_since_creation >= INACTIVITY_THRESHOLD_DAYS).then_some(
                InactivityFinding::NeverContributed {
                    days_since_creation,
                },
            )
        }
        Some(contribution) => {
            let days_since_last = (today - contribution.date).num_days();
            (days_since_last > INACTIVITY_THRESHOLD_DAYS)
                .then_some(InactivityFinding::Stale { days_since_last })
        }
    }
}

/// Derives a saving plan from the observed contribution pattern.
///
/// Needs at least three contributions (ordered by date ascending). The
/// average gap is the span between first and last contribution divided by
/// the number of gaps, clamped to at least one day so same-day bursts
/// collapse to a one-day cadence.
#[must_use]
pub fn evaluate_optimized_saving(contributions: &[GoalContribution]) -> Option<OptimizedSavingPlan> {
    if contributions.len() < OPTIMIZATION_MIN_CONTRIBUTIONS {
        return None;
    }

    let count = Decimal::from(contributions.len());
    let total: Decimal = contributions.iter().map(|c| c.amount).sum();
    let average_amount = total / count;

    let first = contributions.first()?;
    let last = contributions.last()?;
    let span_days = (last.date - first.date).num_days();
    let gaps = Decimal::from(contributions.len() - 1);
    let average_gap_days = (Decimal::from(span_days) / gaps).max(Decimal::ONE);

    let cadence = SavingCadence::from_average_gap(average_gap_days);
    let scale = cadence.period_days() / average_gap_days;
    let suggested_amount = (average_amount * scale).round_dp(2);

    Some(OptimizedSavingPlan {
        cadence,
        average_amount: average_amount.round_dp(2),
        average_gap_days: average_gap_days.round_dp(2),
        suggested_amount,
    })
}

/// Runs the per-goal checks and emits notifications for what they find.
pub struct SuggestionEngine {
    contributions: Arc<dyn GoalContributionRepository>,
    notifications: Arc<NotificationService>,
}

impl SuggestionEngine {
    /// Creates a new engine over its ports.
    pub fn new(
        contributions: Arc<dyn GoalContributionRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            contributions,
            notifications,
        }
    }

    /// Suggests the weekly amount needed to stay on track.
    ///
    /// Returns whether a suggestion was emitted.
    pub async fn suggest_weekly_saving(&self, goal: &Goal) -> AppResult<bool> {
        let Some(suggestion) = evaluate_weekly_saving(goal, Utc::now().date_naive()) else {
            return Ok(false);
        };

        let draft = NotificationDraft {
            title: format!("Saving plan for \"{}\"", goal.name),
            subtitle: None,
            body: format!(
                "Save {} per week ({} per month) to reach your target in {} week(s).",
                suggestion.weekly_amount, suggestion.monthly_amount, suggestion.weeks_remaining
            ),
            category: NotificationCategory::GoalAdvice,
            send_email: false,
            expires_at: None,
        };
        self.notifications.notify_all(&goal.members(), &draft).await?;
        Ok(true)
    }

    /// Warns when the goal's required saving rate has more than doubled.
    ///
    /// Returns whether a warning was emitted.
    pub async fn check_goal_at_risk(&self, goal: &Goal) -> AppResult<bool> {
        let Some(assessment) = evaluate_goal_risk(goal, Utc::now().date_naive()) else {
            return Ok(false);
        };
        if !assessment.at_risk {
            return Ok(false);
        }

        debug!(
            goal_id = %goal.id,
            original = %assessment.original_weekly_rate,
            current = %assessment.current_weekly_rate,
            "goal flagged at risk"
        );
        let draft = NotificationDraft {
            title: format!("\"{}\" is at risk", goal.name),
            subtitle: None,
            body: format!(
                "You now need to save {} per week, up from the {} per week planned at the start. \
                 Consider increasing contributions or extending the deadline.",
                assessment.current_weekly_rate, assessment.original_weekly_rate
            ),
            category: NotificationCategory::GoalRisk,
            send_email: true,
            expires_at: None,
        };
        self.notifications.notify_all(&goal.members(), &draft).await?;
        Ok(true)
    }

    /// Warns when a goal has gone quiet for more than a week.
    ///
    /// Returns whether a warning was emitted.
    pub async fn check_inactivity(&self, goal: &Goal) -> AppResult<bool> {
        let latest = self.contributions.find_latest(goal.id).await?;
        let Some(finding) = evaluate_inactivity(goal, latest.as_ref(), Utc::now().date_naive())
        else {
            return Ok(false);
        };

        let body = match finding {
            InactivityFinding::NeverContributed {
                days_since_creation,
            } => format!(
                "No contributions yet, {days_since_creation} days after creating this goal. \
                 A first contribution gets the plan moving."
            ),
            InactivityFinding::Stale { days_since_last } => format!(
                "Your last contribution was {days_since_last} days ago. \
                 Regular contributions keep the goal on schedule."
            ),
        };
        let draft = NotificationDraft {
            title: format!("\"{}\" needs attention", goal.name),
            subtitle: None,
            body,
            category: NotificationCategory::GoalInactivity,
            send_email: false,
            expires_at: None,
        };
        self.notifications.notify_all(&goal.members(), &draft).await?;
        Ok(true)
    }

    /// Suggests a contribution amount matched to the observed cadence.
    ///
    /// Returns whether a suggestion was emitted.
    pub async fn suggest_optimized_saving(&self, goal: &Goal) -> AppResult<bool> {
        let history = self.contributions.list_for_goal(goal.id).await?;
        let Some(plan) = evaluate_optimized_saving(&history) else {
            return Ok(false);
        };

        let draft = NotificationDraft {
            title: format!("A better rhythm for \"{}\"", goal.name),
            subtitle: None,
            body: format!(
                "You contribute about {} every {} day(s). Rounding that to a {} plan of {} \
                 would keep your pace steady.",
                plan.average_amount,
                plan.average_gap_days,
                plan.cadence.label(),
                plan.suggested_amount
            ),
            category: NotificationCategory::GoalAdvice,
            send_email: false,
            expires_at: None,
        };
        self.notifications.notify_all(&goal.members(), &draft).await?;
        Ok(true)
    }

    /// Runs all four checks for a goal.
    pub async fn run_all(&self, goal: &Goal) -> AppResult<()> {
        self.suggest_weekly_saving(goal).await?;
        self.check_goal_at_risk(goal).await?;
        self.check_inactivity(goal).await?;
        self.suggest_optimized_saving(goal).await?;
        Ok(())
    }
}
