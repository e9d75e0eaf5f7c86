//! Configuration for the `RiskPredictor`.

use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable overriding the model artifact path
pub const MODEL_PATH_ENV: &str = "CARDIO_RISK_MODEL";
/// Environment variable selecting the range policy (`reject` or `clamp`)
pub const RANGE_POLICY_ENV: &str = "CARDIO_RISK_RANGE_POLICY";
/// Environment variable toggling per-assessment logging (`true`/`false`)
pub const LOG_ASSESSMENTS_ENV: &str = "CARDIO_RISK_LOG_ASSESSMENTS";

/// Default location of the model artifact
pub const DEFAULT_MODEL_PATH: &str = "models/heart_attack_risk_model.json";

/// How numeric values outside their declared range are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangePolicy {
    /// Reject the record with an out-of-range error
    #[default]
    Reject,
    /// Clamp to the nearest bound, as a bounded slider would
    Clamp,
}

impl FromStr for RangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            other => Err(format!("Unknown range policy '{other}', expected 'reject' or 'clamp'")),
        }
    }
}

/// Configuration for the `RiskPredictor`
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Path of the serialized classifier artifact
    pub model_path: PathBuf,
    /// Handling of out-of-range numeric input
    pub range_policy: RangePolicy,
    /// Log every produced assessment at info level
    pub log_assessments: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            range_policy: RangePolicy::Reject,
            log_assessments: false,
        }
    }
}

impl PredictorConfig {
    /// Build a configuration from defaults overridden by environment variables
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(MODEL_PATH_ENV) {
            config.model_path = PathBuf::from(path);
        }

        if let Some(policy) = lookup(RANGE_POLICY_ENV) {
            match policy.parse() {
                Ok(policy) => config.range_policy = policy,
                Err(err) => log::warn!("{err}; keeping {:?}", config.range_policy),
            }
        }

        if let Some(flag) = lookup(LOG_ASSESSMENTS_ENV) {
            match flag.trim().parse::<bool>() {
                Ok(flag) => config.log_assessments = flag,
                Err(_) => log::warn!("Ignoring invalid {LOG_ASSESSMENTS_ENV} value '{flag}'"),
            }
        }

        config
    }

    /// Set the model artifact path
    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Set the range policy
    #[must_use]
    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }
}
