//! Pluggable analysis strategies.
//!
//! Each strategy inspects one slice of a user's financial data and either
//! proposes a recommendation or stays quiet. Strategies are side-effect
//! free apart from reasoning-provider calls; persistence and notification
//! belong to the orchestrator.

pub mod budget_gap;
pub mod debt;
pub mod goal_target;
pub mod spending;


use async_trait::async_trait;
use tracing::debug;

use savium_shared::types::UserId;
use savium_shared::AppResult;

use crate::advisor::{AdvisorReply, AdvisorRequest, ReasoningProvider};

use super::types::AnalysisResult;

pub use budget_gap::BudgetGapStrategy;
pub use debt::DebtOpportunityStrategy;
pub use goal_target::UnrealisticGoalStrategy;
pub use spending::SpendingAnomalyStrategy;

/// Identifies a strategy; the label doubles as the notification subtitle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Spending-anomaly detection.
    Spending,
    /// Unrealistic-goal-target detection.
    GoalTarget,
    /// Unbudgeted-category detection.
    BudgetGap,
    /// Debt-payment opportunity.
    Debt,
}

impl StrategyKind {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spending => "Spending analysis",
            Self::GoalTarget => "Goal optimization",
            Self::BudgetGap => "Budget suggestion",
            Self::Debt => "Debt reminder",
        }
    }
}

/// Common contract for analysis strategies.
#[async_trait]
pub trait AnalysisStrategy: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Inspects the user's data. `None` means nothing worth recommending
    /// today; errors mean the inspection itself failed.
    async fn analyze(&self, user_id: UserId) -> AppResult<Option<AnalysisResult>>;
}

/// Two-stage enrichment: try the provider, keep the local result on any
/// failure. The returned reply never causes the strategy to fail.
pub(crate) async fn consult(
    provider: &dyn ReasoningProvider,
    request: AdvisorRequest,
) -> AdvisorReply {
    match provider.advise(&request).await {
        Ok(reply) => reply,
        Err(error) => {
            debug!(error = %error, "reasoning provider unavailable, using local result");
            AdvisorReply::default()
        }
    }
}
