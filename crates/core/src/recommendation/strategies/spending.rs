//! Spending-anomaly strategy.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;

use savium_shared::types::UserId;
use savium_shared::AppResult;

use crate::advisor::{AdvisorRequest, ReasoningProvider};
use crate::finance::{DateRange, TransactionRepository};
use crate::recommendation::types::{
    AnalysisResult, QuickAction, RecommendationPriority, RecommendationType,
};

use super::{consult, AnalysisStrategy, StrategyKind};

/// Months of history the trailing average is computed over.
const TRAILING_MONTHS: u32 = 3;

/// Flags categories where the current month runs more than 20% above the
/// trailing three-month average.
pub struct SpendingAnomalyStrategy {
    transactions: Arc<dyn TransactionRepository>,
    advisor: Arc<dyn ReasoningProvider>,
}

impl SpendingAnomalyStrategy {
    /// Creates the strategy over its ports.
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        advisor: Arc<dyn ReasoningProvider>,
    ) -> Self {
        Self {
            transactions,
            advisor,
        }
    }
}

fn priority_for_increase(percent: Decimal) -> RecommendationPriority {
    if percent >= Decimal::from(50) {
        RecommendationPriority::High
    } else if percent >= Decimal::from(30) {
        RecommendationPriority::Medium
    } else {
        RecommendationPriority::Low
    }
}

#[async_trait]
impl AnalysisStrategy for SpendingAnomalyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Spending
    }

    async fn analyze(&self, user_id: UserId) -> AppResult<Option<AnalysisResult>> {
        let today = Utc::now().date_naive();
        let current = self
            .transactions
            .expense_totals_by_category(user_id, DateRange::month_to_date(today))
            .await?;
        let trailing = self
            .transactions
            .expense_totals_by_category(
                user_id,
                DateRange::trailing_full_months(today, TRAILING_MONTHS),
            )
            .await?;

        let averages: HashMap<String, Decimal> = trailing
            .into_iter()
            .map(|t| (t.category, t.total / Decimal::from(TRAILING_MONTHS)))
            .collect();

        // Worst offender: the category with the largest relative increase
        // beyond the 20% threshold.
        let threshold = Decimal::from(20);
        let mut worst: Option<(String, Decimal, Decimal, Decimal)> = None;
        for entry in current {
            let Some(average) = averages.get(&entry.category).copied() else {
                continue;
            };
            if average <= Decimal::ZERO {
                continue;
            }
            let increase_percent =
                ((entry.total - average) / average * Decimal::ONE_HUNDRED).round_dp(1);
            if increase_percent <= threshold {
                continue;
            }
            let is_worse = worst
                .as_ref()
                .is_none_or(|(_, _, _, prev)| increase_percent > *prev);
            if is_worse {
                worst = Some((entry.category, entry.total, average, increase_percent));
            }
        }

        let Some((category, current_spend, average, increase_percent)) = worst else {
            return Ok(None);
        };

        let local_description = format!(
            "Spending on {category} is {increase_percent}% above your three-month average \
             ({current_spend} this month vs. {average} on average). Worth a look before the \
             month runs away."
        );
        let context = json!({
            "category": category,
            "currentSpend": current_spend,
            "trailingAverage": average,
            "increasePercent": increase_percent,
        });
        let reply = consult(
            self.advisor.as_ref(),
            AdvisorRequest {
                prompt: format!(
                    "A user's {category} spending this month is {increase_percent}% above its \
                     recent average. Phrase a short, concrete nudge to review it."
                ),
                context: context.clone(),
            },
        )
        .await;

        Ok(Some(AnalysisResult {
            recommendation_type: RecommendationType::SpendingAnalysis,
            priority: priority_for_increase(increase_percent),
            title: format!("Unusual {category} spending"),
            description: reply.rationale.unwrap_or(local_description),
            data: context,
            actionable: true,
            actions: vec![QuickAction {
                label: "Review transactions".to_string(),
                path: "/transactions".to_string(),
                prefill: json!({ "category": category }),
            }],
        }))
    }
}
