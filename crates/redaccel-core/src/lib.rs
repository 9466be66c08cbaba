//! Shared configuration for the redaccel workspace.
//!
//! [`AppConfig`] is built once at startup from the environment and handed by
//! reference to the ranker and feedback components. Pricing tiers for revenue
//! projection are loaded from a YAML file.

pub mod app_config;
pub mod config;
pub mod pricing;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use pricing::{load_pricing_tiers, parse_pricing_tiers, PricingFile, PricingTier};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read pricing file {path}: {source}")]
    PricingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pricing file: {0}")]
    PricingFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
