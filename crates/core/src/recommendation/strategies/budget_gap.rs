//! Budget-gap strategy.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use savium_shared::types::UserId;
use savium_shared::AppResult;

use crate::advisor::{AdvisorRequest, ReasoningProvider};
use crate::finance::{BudgetRepository, DateRange, TransactionRepository};
use crate::recommendation::types::{
    AnalysisResult, QuickAction, RecommendationPriority, RecommendationType,
};

use super::{consult, AnalysisStrategy, StrategyKind};

/// Months of history the average is computed over.
const TRAILING_MONTHS: u32 = 3;

/// Categories averaging below this are not worth budgeting.
const MIN_AVERAGE_SPEND: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Fallback budget markup over the average spend (15% headroom).
const BUDGET_MARKUP: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// Recommends a budget for the highest-spending expense category that has
/// no budget this month.
pub struct BudgetGapStrategy {
    transactions: Arc<dyn TransactionRepository>,
    budgets: Arc<dyn BudgetRepository>,
    advisor: Arc<dyn ReasoningProvider>,
}

impl BudgetGapStrategy {
    /// Creates the strategy over its ports.
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        budgets: Arc<dyn BudgetRepository>,
        advisor: Arc<dyn ReasoningProvider>,
    ) -> Self {
        Self {
            transactions,
            budgets,
            advisor,
        }
    }
}

/// The deterministic fallback: average spend plus headroom, rounded up to
/// a whole amount.
#[must_use]
pub fn fallback_budget_limit(average: Decimal) -> Decimal {
    (average * BUDGET_MARKUP).ceil()
}

fn priority_for_average(average: Decimal) -> RecommendationPriority {
    if average >= Decimal::from(500) {
        RecommendationPriority::High
    } else if average >= Decimal::from(200) {
        RecommendationPriority::Medium
    } else {
        RecommendationPriority::Low
    }
}

#[async_trait]
impl AnalysisStrategy for BudgetGapStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BudgetGap
    }

    async fn analyze(&self, user_id: UserId) -> AppResult<Option<AnalysisResult>> {
        let today = Utc::now().date_naive();
        let trailing = self
            .transactions
            .expense_totals_by_category(
                user_id,
                DateRange::trailing_full_months(today, TRAILING_MONTHS),
            )
            .await?;
        let budgeted: HashSet<String> = self
            .budgets
            .list_for_month(user_id, today.year(), today.month())
            .await?
            .into_iter()
            .map(|b| b.category)
            .collect();

        let worst = trailing
            .into_iter()
            .map(|t| (t.category, t.total / Decimal::from(TRAILING_MONTHS)))
            .filter(|(category, average)| {
                *average >= MIN_AVERAGE_SPEND && !budgeted.contains(category)
            })
            .max_by_key(|(_, average)| *average);

        let Some((category, average)) = worst else {
            return Ok(None);
        };

        let local_limit = fallback_budget_limit(average);
        let context = json!({
            "category": category,
            "monthlyAverage": average.round_dp(2),
            "suggestedLimit": local_limit,
        });
        let reply = consult(
            self.advisor.as_ref(),
            AdvisorRequest {
                prompt: format!(
                    "A user spends about {} per month on {category} with no budget set. \
                     Suggest a sensible monthly limit and one sentence of reasoning.",
                    average.round_dp(2)
                ),
                context: context.clone(),
            },
        )
        .await;

        let limit = reply
            .amount
            .filter(|a| *a > Decimal::ZERO)
            .unwrap_or(local_limit);
        let local_description = format!(
            "You spend about {} per month on {category} but have no budget for it. \
             A monthly limit of {limit} would cover the usual spend with some headroom.",
            average.round_dp(2)
        );

        Ok(Some(AnalysisResult {
            recommendation_type: RecommendationType::BudgetSuggestion,
            priority: priority_for_average(average),
            title: format!("No budget for {category}"),
            description: reply.rationale.unwrap_or(local_description),
            data: context,
            actionable: true,
            actions: vec![QuickAction {
                label: "Create budget".to_string(),
                path: "/budgets/new".to_string(),
                prefill: json!({ "category": category, "amount": limit }),
            }],
        }))
    }
}
