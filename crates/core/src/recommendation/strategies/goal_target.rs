//! Unrealistic-goal-target strategy.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;

use savium_shared::types::UserId;
use savium_shared::AppResult;

use crate::advisor::{AdvisorRequest, ReasoningProvider};
use crate::goal::{Goal, GoalContributionRepository, GoalRepository};
use crate::recommendation::types::{
    AnalysisResult, QuickAction, RecommendationPriority, RecommendationType,
};

use super::{consult, AnalysisStrategy, StrategyKind};

struct GoalPressure {
    goal: Goal,
    required_daily: Decimal,
    historical_daily: Decimal,
    ratio: Decimal,
}

/// Flags the goal whose required daily saving rate most exceeds what the
/// user has historically managed. Only goals with at least one
/// contribution are considered; a ratio above 2 flags.
pub struct UnrealisticGoalStrategy {
    goals: Arc<dyn GoalRepository>,
    contributions: Arc<dyn GoalContributionRepository>,
    advisor: Arc<dyn ReasoningProvider>,
}

impl UnrealisticGoalStrategy {
    /// Creates the strategy over its ports.
    pub fn new(
        goals: Arc<dyn GoalRepository>,
        contributions: Arc<dyn GoalContributionRepository>,
        advisor: Arc<dyn ReasoningProvider>,
    ) -> Self {
        Self {
            goals,
            contributions,
            advisor,
        }
    }
}

fn priority_for_ratio(ratio: Decimal) -> RecommendationPriority {
    if ratio >= Decimal::from(3) {
        RecommendationPriority::High
    } else {
        RecommendationPriority::Medium
    }
}

#[async_trait]
impl AnalysisStrategy for UnrealisticGoalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GoalTarget
    }

    async fn analyze(&self, user_id: UserId) -> AppResult<Option<AnalysisResult>> {
        let today = Utc::now().date_naive();
        let goals = self.goals.list_active_for_user(user_id).await?;

        let mut worst: Option<GoalPressure> = None;
        for goal in goals {
            if goal.is_met() {
                continue;
            }
            let days_left = goal.days_remaining(today);
            if days_left <= 0 {
                continue;
            }
            let history = self.contributions.list_for_goal(goal.id).await?;
            let Some(first) = history.first() else {
                continue;
            };

            let total: Decimal = history.iter().map(|c| c.amount).sum();
            let observed_days = (today - first.date).num_days().max(1);
            let historical_daily = total / Decimal::from(observed_days);
            if historical_daily <= Decimal::ZERO {
                continue;
            }

            let required_daily = goal.remaining_amount() / Decimal::from(days_left);
            let ratio = required_daily / historical_daily;
            let is_worse = worst.as_ref().is_none_or(|w| ratio > w.ratio);
            if is_worse {
                worst = Some(GoalPressure {
                    goal,
                    required_daily,
                    historical_daily,
                    ratio,
                });
            }
        }

        let Some(pressure) = worst else {
            return Ok(None);
        };
        if pressure.ratio <= Decimal::TWO {
            return Ok(None);
        }

        let days_left = pressure.goal.days_remaining(today);
        let achievable_target = (pressure.goal.current_amount
            + pressure.historical_daily * Decimal::from(days_left))
        .round_dp(2);
        let local_description = format!(
            "Reaching \"{}\" by its deadline now takes {} per day, but you have been saving \
             about {} per day. Lowering the target to around {} or extending the deadline \
             would make it achievable.",
            pressure.goal.name,
            pressure.required_daily.round_dp(2),
            pressure.historical_daily.round_dp(2),
            achievable_target
        );
        let context = json!({
            "goalId": pressure.goal.id,
            "goalName": pressure.goal.name,
            "requiredDaily": pressure.required_daily.round_dp(2),
            "historicalDaily": pressure.historical_daily.round_dp(2),
            "ratio": pressure.ratio.round_dp(2),
            "achievableTarget": achievable_target,
        });
        let reply = consult(
            self.advisor.as_ref(),
            AdvisorRequest {
                prompt: format!(
                    "A savings goal needs {} per day but the user manages about {} per day. \
                     Phrase a short, supportive suggestion to adjust the target or deadline.",
                    pressure.required_daily.round_dp(2),
                    pressure.historical_daily.round_dp(2)
                ),
                context: context.clone(),
            },
        )
        .await;

        let suggested_target = reply
            .amount
            .filter(|a| *a > Decimal::ZERO)
            .unwrap_or(achievable_target);

        Ok(Some(AnalysisResult {
            recommendation_type: RecommendationType::GoalOptimization,
            priority: priority_for_ratio(pressure.ratio),
            title: format!("\"{}\" may be out of reach", pressure.goal.name),
            description: reply.rationale.unwrap_or(local_description),
            data: context,
            actionable: true,
            actions: vec![QuickAction {
                label: "Adjust goal".to_string(),
                path: format!("/goals/{}/edit", pressure.goal.id),
                prefill: json!({ "targetAmount": suggested_target }),
            }],
        }))
    }
}
