//! Repository ports for the financial collaborators.

use async_trait::async_trait;

use savium_shared::types::UserId;
use savium_shared::AppResult;

use super::types::{Budget, CategoryTotal, DateRange, Debt, DebtStatus, MonthlyBalance};

/// Port for transaction aggregation queries.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Sums expense amounts per category over a date range.
    async fn expense_totals_by_category(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> AppResult<Vec<CategoryTotal>>;

    /// Income and expense totals for one calendar month.
    async fn monthly_balance(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> AppResult<MonthlyBalance>;
}

/// Port for budget lookups.
#[async_trait]
pub trait BudgetRepository: Send + Sync {
    /// Lists a user's budgets for one calendar month.
    async fn list_for_month(&self, user_id: UserId, year: i32, month: u32)
        -> AppResult<Vec<Budget>>;
}

/// Port for debt lookups.
#[async_trait]
pub trait DebtRepository: Send + Sync {
    /// Lists a user's debts with the given status.
    async fn list_by_status(&self, user_id: UserId, status: DebtStatus) -> AppResult<Vec<Debt>>;
}
