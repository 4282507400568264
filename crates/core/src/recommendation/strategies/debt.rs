//! Debt-payment-opportunity strategy.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use savium_shared::types::UserId;
use savium_shared::AppResult;

use crate::advisor::{AdvisorRequest, ReasoningProvider};
use crate::finance::{DebtRepository, DebtStatus, TransactionRepository};
use crate::recommendation::types::{
    AnalysisResult, QuickAction, RecommendationPriority, RecommendationType,
};

use super::{consult, AnalysisStrategy, StrategyKind};

/// How far ahead a due date counts as "coming up". Overdue debts are
/// included; they are at least as urgent.
const DUE_WINDOW_DAYS: i64 = 15;

/// Recommends paying the most urgent upcoming debt when this month's
/// balance leaves room for it.
pub struct DebtOpportunityStrategy {
    debts: Arc<dyn DebtRepository>,
    transactions: Arc<dyn TransactionRepository>,
    advisor: Arc<dyn ReasoningProvider>,
}

impl DebtOpportunityStrategy {
    /// Creates the strategy over its ports.
    pub fn new(
        debts: Arc<dyn DebtRepository>,
        transactions: Arc<dyn TransactionRepository>,
        advisor: Arc<dyn ReasoningProvider>,
    ) -> Self {
        Self {
            debts,
            transactions,
            advisor,
        }
    }
}

fn priority_for_days(days_until_due: i64) -> RecommendationPriority {
    if days_until_due <= 5 {
        RecommendationPriority::High
    } else if days_until_due <= 10 {
        RecommendationPriority::Medium
    } else {
        RecommendationPriority::Low
    }
}

#[async_trait]
impl AnalysisStrategy for DebtOpportunityStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Debt
    }

    async fn analyze(&self, user_id: UserId) -> AppResult<Option<AnalysisResult>> {
        let today = Utc::now().date_naive();
        let unpaid = self.debts.list_by_status(user_id, DebtStatus::Pending).await?;

        let target = unpaid
            .into_iter()
            .filter(|d| d.days_until_due(today) <= DUE_WINDOW_DAYS)
            .min_by_key(|d| d.days_until_due(today));
        let Some(debt) = target else {
            return Ok(None);
        };

        let balance = self
            .transactions
            .monthly_balance(user_id, today.year(), today.month())
            .await?
            .net();
        if balance <= Decimal::ZERO {
            return Ok(None);
        }

        let full_payoff = balance >= debt.amount;
        let local_payment = if full_payoff {
            debt.amount
        } else {
            // Half of what is left this month, so the payment never
            // empties the balance.
            (balance / Decimal::TWO).round_dp(2)
        };

        let days_until_due = debt.days_until_due(today);
        let context = json!({
            "debtId": debt.id,
            "creditor": debt.creditor,
            "debtAmount": debt.amount,
            "daysUntilDue": days_until_due,
            "monthlyBalance": balance,
            "suggestedPayment": local_payment,
            "fullPayoff": full_payoff,
        });
        let reply = consult(
            self.advisor.as_ref(),
            AdvisorRequest {
                prompt: format!(
                    "A debt of {} to {} is due in {days_until_due} day(s) and the user has {} \
                     left this month. Suggest a payment amount and one sentence of reasoning.",
                    debt.amount, debt.creditor, balance
                ),
                context: context.clone(),
            },
        )
        .await;

        let payment = reply
            .amount
            .filter(|a| *a > Decimal::ZERO && *a <= balance)
            .unwrap_or(local_payment);
        let local_description = if full_payoff {
            format!(
                "Your {} debt to {} is due in {days_until_due} day(s) and this month's balance \
                 of {balance} covers it in full.",
                debt.amount, debt.creditor
            )
        } else {
            format!(
                "Your {} debt to {} is due in {days_until_due} day(s). Putting {payment} toward \
                 it now would take the pressure off.",
                debt.amount, debt.creditor
            )
        };

        Ok(Some(AnalysisResult {
            recommendation_type: RecommendationType::DebtReminder,
            priority: priority_for_days(days_until_due),
            title: format!("Payment to {} coming up", debt.creditor),
            description: reply.rationale.unwrap_or(local_description),
            data: context,
            actionable: true,
            actions: vec![QuickAction {
                label: "Pay debt".to_string(),
                path: format!("/debts/{}/pay", debt.id),
                prefill: json!({ "amount": payment }),
            }],
        }))
    }
}
