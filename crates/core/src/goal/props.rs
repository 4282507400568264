//! Property-based tests for schedule planning.
//!
//! - Generated plans always cover the remaining amount despite rounding.
//! - No planned date ever exceeds the goal's end date.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use savium_shared::types::{GoalId, UserId};

use super::schedule::plan_installments;
use super::types::Goal;

/// Strategy to generate positive target amounts (0.01 to 100,000.00).
fn target_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate progress as a fraction of the target (0% to 150%).
fn progress_percent() -> impl Strategy<Value = Decimal> {
    (0i64..150i64).prop_map(Decimal::from)
}

fn goal_with(
    target: Decimal,
    progress: Decimal,
    days_to_end: i64,
    frequency: u32,
) -> Goal {
    let today = Utc::now().date_naive();
    Goal {
        id: GoalId::new(),
        owner_id: UserId::new(),
        co_owner_id: None,
        name: "prop goal".to_string(),
        target_amount: target,
        current_amount: (target * progress / Decimal::ONE_HUNDRED).round_dp(2),
        end_date: today + Duration::days(days_to_end),
        contribution_frequency_days: Some(frequency),
        contribution_amount: None,
        created_at: Utc::now(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The plan's total is never below the remaining amount, and every
    /// date stays on or before the end date.
    #[test]
    fn prop_plan_covers_remainder_within_window(
        target in target_amount(),
        progress in progress_percent(),
        days_to_end in 1i64..365,
        frequency in 1u32..60,
    ) {
        let today = Utc::now().date_naive();
        let goal = goal_with(target, progress, days_to_end, frequency);
        let plan = plan_installments(&goal, today);

        for installment in &plan {
            prop_assert!(installment.date <= goal.end_date);
            prop_assert!(installment.date > today);
        }

        if !plan.is_empty() {
            let total: Decimal = plan.iter().map(|p| p.amount).sum();
            prop_assert!(total >= goal.remaining_amount());
        }
    }

    /// A plan exists exactly when something remains and at least one
    /// whole frequency window fits before the end date.
    #[test]
    fn prop_plan_emptiness_matches_inputs(
        target in target_amount(),
        progress in progress_percent(),
        days_to_end in 1i64..365,
        frequency in 1u32..60,
    ) {
        let today = Utc::now().date_naive();
        let goal = goal_with(target, progress, days_to_end, frequency);
        let plan = plan_installments(&goal, today);

        let has_room = days_to_end / i64::from(frequency) > 0;
        let has_remainder = goal.remaining_amount() > Decimal::ZERO;
        prop_assert_eq!(plan.is_empty(), !(has_room && has_remainder));
    }

    /// Installment count never exceeds the number of whole frequency
    /// windows, and all auto amounts are equal.
    #[test]
    fn prop_plan_shape(
        target in target_amount(),
        days_to_end in 1i64..365,
        frequency in 1u32..60,
    ) {
        let today = Utc::now().date_naive();
        let goal = goal_with(target, Decimal::ZERO, days_to_end, frequency);
        let plan = plan_installments(&goal, today);

        let max_installments = days_to_end / i64::from(frequency);
        prop_assert!(i64::try_from(plan.len()).unwrap() <= max_installments);

        if let Some(first) = plan.first() {
            prop_assert!(plan.iter().all(|p| p.amount == first.amount));
        }
    }
}
