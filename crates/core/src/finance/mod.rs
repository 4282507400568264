//! Transaction, budget, and debt collaborator types and ports.
//!
//! These entities are owned by other parts of the backend; the analysis
//! strategies only read them through the ports defined here.

pub mod repository;
pub mod types;

pub use repository::{BudgetRepository, DebtRepository, TransactionRepository};
pub use types::{
    Budget, CategoryTotal, DateRange, Debt, DebtStatus, MonthlyBalance, Transaction,
    TransactionKind,
};
