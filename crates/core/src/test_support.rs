//! In-memory port implementations and builders shared by the unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use savium_shared::types::{
    ContributionId, DebtId, GoalId, NotificationId, ScheduleEntryId, TransactionId, UserId,
};
use savium_shared::{AppError, AppResult};

use crate::advisor::{AdvisorError, AdvisorReply, AdvisorRequest, ReasoningProvider};
use crate::finance::{
    Budget, BudgetRepository, CategoryTotal, DateRange, Debt, DebtRepository, DebtStatus,
    MonthlyBalance, Transaction, TransactionKind, TransactionRepository,
};
use crate::goal::{
    Goal, GoalContribution, GoalContributionRepository, GoalContributionSchedule, GoalRepository,
    GoalScheduleRepository, NewScheduleEntry, ScheduleStatus,
};
use crate::notification::{
    NewNotification, Notification, NotificationCategory, NotificationRepository,
};
use crate::recommendation::{Recommendation, RecommendationRepository, UserSettingsRepository};

// ============================================================================
// Builders
// ============================================================================

/// A goal `days_to_end` days from expiry, created `days_since_creation`
/// days ago.
pub fn make_goal(
    owner_id: UserId,
    target: Decimal,
    current: Decimal,
    days_to_end: i64,
    frequency_days: Option<u32>,
    days_since_creation: i64,
) -> Goal {
    let today = Utc::now().date_naive();
    Goal {
        id: GoalId::new(),
        owner_id,
        co_owner_id: None,
        name: "Trip fund".to_string(),
        target_amount: target,
        current_amount: current,
        end_date: today + Duration::days(days_to_end),
        contribution_frequency_days: frequency_days,
        contribution_amount: None,
        created_at: Utc::now() - Duration::days(days_since_creation),
    }
}

/// A contribution dated `days_ago` days before today.
pub fn make_contribution(goal: &Goal, amount: Decimal, days_ago: i64) -> GoalContribution {
    GoalContribution {
        id: ContributionId::new(),
        goal_id: goal.id,
        user_id: goal.owner_id,
        amount,
        date: Utc::now().date_naive() - Duration::days(days_ago),
    }
}

/// An expense transaction dated `days_ago` days before today.
pub fn make_expense(user_id: UserId, category: &str, amount: Decimal, days_ago: i64) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        user_id,
        kind: TransactionKind::Expense,
        category: category.to_string(),
        amount,
        date: Utc::now().date_naive() - Duration::days(days_ago),
    }
}

/// An income transaction dated `days_ago` days before today.
pub fn make_income(user_id: UserId, amount: Decimal, days_ago: i64) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        user_id,
        kind: TransactionKind::Income,
        category: "salary".to_string(),
        amount,
        date: Utc::now().date_naive() - Duration::days(days_ago),
    }
}

/// A pending debt due `days_to_due` days from today.
pub fn make_debt(user_id: UserId, amount: Decimal, days_to_due: i64) -> Debt {
    Debt {
        id: DebtId::new(),
        user_id,
        creditor: "Card issuer".to_string(),
        amount,
        due_date: Utc::now().date_naive() + Duration::days(days_to_due),
        status: DebtStatus::Pending,
    }
}

// ============================================================================
// Goal-side fakes
// ============================================================================

/// In-memory `GoalRepository`.
#[derive(Default)]
pub struct InMemoryGoals {
    goals: Mutex<Vec<Goal>>,
}

impl InMemoryGoals {
    pub fn with(goals: Vec<Goal>) -> Self {
        Self {
            goals: Mutex::new(goals),
        }
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoals {
    async fn find_by_id(&self, id: GoalId) -> AppResult<Option<Goal>> {
        Ok(self.goals.lock().unwrap().iter().find(|g| g.id == id).cloned())
    }

    async fn list_active(&self) -> AppResult<Vec<Goal>> {
        let today = Utc::now().date_naive();
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.end_date >= today)
            .cloned()
            .collect())
    }

    async fn list_active_for_user(&self, user_id: UserId) -> AppResult<Vec<Goal>> {
        Ok(self
            .list_active()
            .await?
            .into_iter()
            .filter(|g| g.owner_id == user_id)
            .collect())
    }
}

/// In-memory `GoalContributionRepository`.
#[derive(Default)]
pub struct InMemoryContributions {
    contributions: Mutex<Vec<GoalContribution>>,
}

impl InMemoryContributions {
    pub fn with(contributions: Vec<GoalContribution>) -> Self {
        Self {
            contributions: Mutex::new(contributions),
        }
    }
}

#[async_trait]
impl GoalContributionRepository for InMemoryContributions {
    async fn list_for_goal(&self, goal_id: GoalId) -> AppResult<Vec<GoalContribution>> {
        let mut list: Vec<_> = self
            .contributions
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.goal_id == goal_id)
            .cloned()
            .collect();
        list.sort_by_key(|c| c.date);
        Ok(list)
    }

    async fn find_latest(&self, goal_id: GoalId) -> AppResult<Option<GoalContribution>> {
        Ok(self
            .list_for_goal(goal_id)
            .await?
            .into_iter()
            .max_by_key(|c| c.date))
    }
}

/// In-memory `GoalScheduleRepository`.
#[derive(Default)]
pub struct InMemorySchedules {
    entries: Mutex<Vec<GoalContributionSchedule>>,
}

impl InMemorySchedules {
    pub fn with(entries: Vec<GoalContributionSchedule>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Snapshot of the stored entries.
    pub fn snapshot(&self) -> Vec<GoalContributionSchedule> {
        self.entries.lock().unwrap().clone()
    }
}

/// A pending schedule entry for tests that seed existing plans.
pub fn make_pending_entry(goal: &Goal, date: NaiveDate, amount: Decimal) -> GoalContributionSchedule {
    GoalContributionSchedule {
        id: ScheduleEntryId::new(),
        goal_id: goal.id,
        user_id: goal.owner_id,
        scheduled_date: date,
        amount,
        status: ScheduleStatus::Pending,
        contribution_id: None,
    }
}

#[async_trait]
impl GoalScheduleRepository for InMemorySchedules {
    async fn list_for_goal(&self, goal_id: GoalId) -> AppResult<Vec<GoalContributionSchedule>> {
        let mut list: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.goal_id == goal_id)
            .cloned()
            .collect();
        list.sort_by_key(|e| e.scheduled_date);
        Ok(list)
    }

    async fn create_many(&self, new_entries: Vec<NewScheduleEntry>) -> AppResult<usize> {
        let mut entries = self.entries.lock().unwrap();
        let count = new_entries.len();
        for entry in new_entries {
            entries.push(GoalContributionSchedule {
                id: ScheduleEntryId::new(),
                goal_id: entry.goal_id,
                user_id: entry.user_id,
                scheduled_date: entry.scheduled_date,
                amount: entry.amount,
                status: ScheduleStatus::Pending,
                contribution_id: None,
            });
        }
        Ok(count)
    }

    async fn update_amount(&self, entry_id: ScheduleEntryId, amount: Decimal) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| AppError::NotFound(format!("schedule entry {entry_id}")))?;
        entry.amount = amount;
        Ok(())
    }

    async fn mark_completed(
        &self,
        entry_id: ScheduleEntryId,
        contribution_id: ContributionId,
    ) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| AppError::NotFound(format!("schedule entry {entry_id}")))?;
        entry.status = ScheduleStatus::Completed;
        entry.contribution_id = Some(contribution_id);
        Ok(())
    }
}

// ============================================================================
// Notification fakes
// ============================================================================

/// In-memory `NotificationRepository`, optionally failing every create.
#[derive(Default)]
pub struct InMemoryNotifications {
    notifications: Mutex<Vec<Notification>>,
    failing: bool,
}

impl InMemoryNotifications {
    /// A store where every create fails with a database error.
    pub fn failing() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Snapshot of the stored notifications.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        if self.failing {
            return Err(AppError::Database("notification store down".to_string()));
        }
        let stored = Notification {
            id: NotificationId::new(),
            user_id: notification.user_id,
            title: notification.title,
            subtitle: notification.subtitle,
            body: notification.body,
            category: notification.category,
            send_email: notification.send_email,
            created_at: Utc::now(),
            expires_at: notification.expires_at,
        };
        self.notifications.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_since(
        &self,
        user_id: UserId,
        category: NotificationCategory,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Notification>> {
        let mut list: Vec<_> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && n.category == category && n.created_at >= since)
            .cloned()
            .collect();
        list.sort_by_key(|n| std::cmp::Reverse(n.created_at));
        Ok(list)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| n.expires_at.is_none_or(|e| e > now));
        Ok((before - notifications.len()) as u64)
    }
}

// ============================================================================
// Finance fakes (aggregate honestly over stored rows)
// ============================================================================

/// In-memory `TransactionRepository` computing real aggregations.
#[derive(Default)]
pub struct InMemoryTransactions {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactions {
    pub fn with(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
        }
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactions {
    async fn expense_totals_by_category(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> AppResult<Vec<CategoryTotal>> {
        let transactions = self.transactions.lock().unwrap();
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for t in transactions.iter().filter(|t| {
            t.user_id == user_id && t.kind == TransactionKind::Expense && range.contains(t.date)
        }) {
            match totals.iter_mut().find(|c| c.category == t.category) {
                Some(entry) => entry.total += t.amount,
                None => totals.push(CategoryTotal {
                    category: t.category.clone(),
                    total: t.amount,
                }),
            }
        }
        Ok(totals)
    }

    async fn monthly_balance(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> AppResult<MonthlyBalance> {
        let transactions = self.transactions.lock().unwrap();
        let mut balance = MonthlyBalance {
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
        };
        for t in transactions.iter().filter(|t| {
            t.user_id == user_id && t.date.year() == year && t.date.month() == month
        }) {
            match t.kind {
                TransactionKind::Income => balance.income += t.amount,
                TransactionKind::Expense => balance.expenses += t.amount,
            }
        }
        Ok(balance)
    }
}

/// In-memory `BudgetRepository`.
#[derive(Default)]
pub struct InMemoryBudgets {
    budgets: Mutex<Vec<Budget>>,
}

impl InMemoryBudgets {
    pub fn with(budgets: Vec<Budget>) -> Self {
        Self {
            budgets: Mutex::new(budgets),
        }
    }
}

#[async_trait]
impl BudgetRepository for InMemoryBudgets {
    async fn list_for_month(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<Budget>> {
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                b.user_id == user_id && b.month.year() == year && b.month.month() == month
            })
            .cloned()
            .collect())
    }
}

/// In-memory `DebtRepository`.
#[derive(Default)]
pub struct InMemoryDebts {
    debts: Mutex<Vec<Debt>>,
}

impl InMemoryDebts {
    pub fn with(debts: Vec<Debt>) -> Self {
        Self {
            debts: Mutex::new(debts),
        }
    }
}

#[async_trait]
impl DebtRepository for InMemoryDebts {
    async fn list_by_status(&self, user_id: UserId, status: DebtStatus) -> AppResult<Vec<Debt>> {
        Ok(self
            .debts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == user_id && d.status == status)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Recommendation fakes
// ============================================================================

/// In-memory `RecommendationRepository`.
#[derive(Default)]
pub struct InMemoryRecommendations {
    recommendations: Mutex<Vec<Recommendation>>,
}

impl InMemoryRecommendations {
    pub fn with(recommendations: Vec<Recommendation>) -> Self {
        Self {
            recommendations: Mutex::new(recommendations),
        }
    }

    /// Snapshot of the stored recommendations.
    pub fn snapshot(&self) -> Vec<Recommendation> {
        self.recommendations.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryRecommendations {
    async fn create(&self, recommendation: Recommendation) -> AppResult<Recommendation> {
        self.recommendations
            .lock()
            .unwrap()
            .push(recommendation.clone());
        Ok(recommendation)
    }

    async fn find_pending_since(
        &self,
        user_id: UserId,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Recommendation>> {
        use crate::recommendation::RecommendationStatus;
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.user_id == user_id
                    && r.status == RecommendationStatus::Pending
                    && r.created_at >= since
            })
            .cloned()
            .collect())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut recommendations = self.recommendations.lock().unwrap();
        let before = recommendations.len();
        recommendations.retain(|r| r.expires_at > now);
        Ok((before - recommendations.len()) as u64)
    }
}

/// Static `UserSettingsRepository`: listed users are candidates; opted-in
/// users get recommendations.
#[derive(Default)]
pub struct StaticUserSettings {
    candidates: Vec<UserId>,
    opted_in: HashSet<UserId>,
}

impl StaticUserSettings {
    pub fn new(candidates: Vec<UserId>, opted_in: Vec<UserId>) -> Self {
        Self {
            candidates,
            opted_in: opted_in.into_iter().collect(),
        }
    }

    /// A single opted-in user.
    pub fn opted_in(user_id: UserId) -> Self {
        Self::new(vec![user_id], vec![user_id])
    }
}

#[async_trait]
impl UserSettingsRepository for StaticUserSettings {
    async fn recommendations_enabled(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.opted_in.contains(&user_id))
    }

    async fn list_recommendation_candidates(&self) -> AppResult<Vec<UserId>> {
        Ok(self.candidates.clone())
    }
}

// ============================================================================
// Advisor stubs
// ============================================================================

/// A provider that always answers with the given reply.
pub struct StubAdvisor {
    reply: AdvisorReply,
}

impl StubAdvisor {
    pub fn new(reply: AdvisorReply) -> Self {
        Self { reply }
    }
}

#[async_trait]
impl ReasoningProvider for StubAdvisor {
    async fn advise(&self, _request: &AdvisorRequest) -> Result<AdvisorReply, AdvisorError> {
        Ok(self.reply.clone())
    }
}
