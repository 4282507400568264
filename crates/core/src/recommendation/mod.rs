//! Daily analysis strategies and the recommendation orchestrator.

pub mod orchestrator;
pub mod repository;
pub mod selector;
pub mod strategies;
pub mod types;


pub use orchestrator::{BatchOutcome, RecommendationOrchestrator};
pub use repository::{RecommendationRepository, UserSettingsRepository};
pub use selector::{FixedSelector, StrategySelector, UniformSelector};
pub use strategies::{AnalysisStrategy, StrategyKind};
pub use types::{
    AnalysisResult, QuickAction, Recommendation, RecommendationPriority, RecommendationStatus,
    RecommendationType, RECOMMENDATION_TTL_DAYS,
};
