//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Reasoning provider configuration.
    #[serde(default)]
    pub advisor: AdvisorConfig,
    /// Background job schedules.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Recommendation engine tuning.
    #[serde(default)]
    pub recommendation: RecommendationConfig,
}

/// Reasoning provider (remote enrichment) configuration.
///
/// The provider is best-effort: a missing credential or unreachable
/// endpoint must never disable the engine, only its phrasing.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// Whether remote enrichment is attempted at all.
    #[serde(default = "default_advisor_enabled")]
    pub enabled: bool,
    /// Base URL of the provider endpoint.
    #[serde(default = "default_advisor_base_url")]
    pub base_url: String,
    /// API credential; absent means every call falls back locally.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier sent with each request.
    #[serde(default = "default_advisor_model")]
    pub model: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_advisor_timeout")]
    pub timeout_secs: u64,
}

fn default_advisor_enabled() -> bool {
    true
}

fn default_advisor_base_url() -> String {
    "https://api.advisor.internal/v1/suggest".to_string()
}

fn default_advisor_model() -> String {
    "finance-small".to_string()
}

fn default_advisor_timeout() -> u64 {
    10
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: default_advisor_enabled(),
            base_url: default_advisor_base_url(),
            api_key: None,
            model: default_advisor_model(),
            timeout_secs: default_advisor_timeout(),
        }
    }
}

/// Cron expressions for the background jobs (six-field, seconds first).
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Daily recommendation batch.
    #[serde(default = "default_recommendation_cron")]
    pub recommendation_cron: String,
    /// Goal suggestion sweep.
    #[serde(default = "default_suggestion_cron")]
    pub suggestion_cron: String,
    /// Schedule upkeep sweep (re-spreads pending installments).
    #[serde(default = "default_upkeep_cron")]
    pub upkeep_cron: String,
    /// Expired notification/recommendation cleanup.
    #[serde(default = "default_cleanup_cron")]
    pub cleanup_cron: String,
}

fn default_recommendation_cron() -> String {
    // Daily at 8 AM
    "0 0 8 * * *".to_string()
}

fn default_suggestion_cron() -> String {
    // Monday at 9 AM
    "0 0 9 * * 1".to_string()
}

fn default_upkeep_cron() -> String {
    // Daily at 2:30 AM
    "0 30 2 * * *".to_string()
}

fn default_cleanup_cron() -> String {
    // Daily at 2 AM
    "0 0 2 * * *".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            recommendation_cron: default_recommendation_cron(),
            suggestion_cron: default_suggestion_cron(),
            upkeep_cron: default_upkeep_cron(),
            cleanup_cron: default_cleanup_cron(),
        }
    }
}

/// Recommendation engine tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    /// Days until a generated recommendation expires.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,
}

fn default_expiry_days() -> i64 {
    7
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            expiry_days: default_expiry_days(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, config files, and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SAVIUM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
