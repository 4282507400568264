//! Savings goals, contribution schedules, and per-goal suggestions.

pub mod repository;
pub mod schedule;
pub mod suggestion;
pub mod types;

#[cfg(test)]
mod props;

pub use repository::{GoalContributionRepository, GoalRepository, GoalScheduleRepository};
pub use schedule::{plan_installments, SchedulePlanner};
pub use suggestion::{
    evaluate_goal_risk, evaluate_inactivity, evaluate_optimized_saving, evaluate_weekly_saving,
    InactivityFinding, OptimizedSavingPlan, RiskAssessment, SavingCadence, SuggestionEngine,
    WeeklySavingSuggestion,
};
pub use types::{
    Goal, GoalContribution, GoalContributionSchedule, NewScheduleEntry, PlannedInstallment,
    ScheduleStatus,
};
