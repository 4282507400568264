//! Financial collaborator data types.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use savium_shared::types::{BudgetId, DebtId, TransactionId, UserId};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// A recorded transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Direction.
    pub kind: TransactionKind,
    /// Spending/income category.
    pub category: String,
    /// Amount (always positive; direction is in `kind`).
    pub amount: Decimal,
    /// Date of the transaction.
    pub date: NaiveDate,
}

/// Per-category sum over some date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Summed amount.
    pub total: Decimal,
}

/// Income and expenses for one calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// Total income.
    pub income: Decimal,
    /// Total expenses.
    pub expenses: Decimal,
}

impl MonthlyBalance {
    /// Net amount left over (income minus expenses).
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

/// A monthly spending budget for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    pub user_id: UserId,
    /// Budgeted category.
    pub category: String,
    /// First day of the budgeted month.
    pub month: NaiveDate,
    /// Spending limit for the month.
    pub limit_amount: Decimal,
}

/// Payment status of a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    /// Not yet paid.
    Pending,
    /// Fully paid.
    Paid,
}

/// A debt owed by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    /// Debt ID.
    pub id: DebtId,
    /// Owing user.
    pub user_id: UserId,
    /// Who the debt is owed to.
    pub creditor: String,
    /// Outstanding amount.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Payment status.
    pub status: DebtStatus,
}

impl Debt {
    /// Whole days until the due date (negative when overdue).
    #[must_use]
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// The current month up to and including `today`.
    #[must_use]
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start: first_of_month(today),
            end: today,
        }
    }

    /// The `months` full calendar months before the current one.
    #[must_use]
    pub fn trailing_full_months(today: NaiveDate, months: u32) -> Self {
        let current_start = first_of_month(today);
        Self {
            start: current_start
                .checked_sub_months(Months::new(months))
                .unwrap_or(current_start),
            end: current_start.pred_opt().unwrap_or(current_start),
        }
    }

    /// Returns true if the date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
