use std::env;
use std::fmt;

use crate::valuation::SourceWeights;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub valuation: ValuationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_weights = match env::var("VALUATION_DEFAULT_WEIGHTS") {
            Ok(raw) => parse_weights(&raw)?,
            Err(_) => SourceWeights::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            valuation: ValuationConfig { default_weights },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied to new estimation sessions.
#[derive(Debug, Clone, Default)]
pub struct ValuationConfig {
    pub default_weights: SourceWeights,
}

/// Parses `sales,listings,estimates`, e.g. `50,30,20`.
pub fn parse_weights(raw: &str) -> Result<SourceWeights, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidWeights {
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let parts = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid("every weight must be a number"))?;

    let &[sales, listings, estimates] = parts.as_slice() else {
        return Err(invalid("expected three comma-separated weights"));
    };

    let weights = SourceWeights::new(sales, listings, estimates);
    if [sales, listings, estimates]
        .iter()
        .any(|weight| !weight.is_finite() || *weight < 0.0)
    {
        return Err(invalid("weights must be non-negative"));
    }
    if weights.total() <= 0.0 {
        return Err(invalid("at least one weight must be positive"));
    }

    Ok(weights)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWeights { value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWeights { value, reason } => write!(
                f,
                "VALUATION_DEFAULT_WEIGHTS '{}' is invalid: {}",
                value, reason
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
