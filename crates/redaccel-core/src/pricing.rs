use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One subscription tier used for revenue projection.
///
/// `allocation_percent` is the share (0-100) of converting users expected to
/// pick this tier. Allocations across tiers are not required to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    pub price: f64,
    pub allocation_percent: f64,
}

impl PricingTier {
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64, allocation_percent: f64) -> Self {
        Self {
            name: name.into(),
            price,
            allocation_percent,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PricingFile {
    pub tiers: Vec<PricingTier>,
}

/// Load and validate pricing tiers from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_pricing_tiers(path: &Path) -> Result<Vec<PricingTier>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PricingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_pricing_tiers(&content)
}

/// Parse and validate pricing tiers from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or a tier fails validation.
pub fn parse_pricing_tiers(content: &str) -> Result<Vec<PricingTier>, ConfigError> {
    let file: PricingFile = serde_yaml::from_str(content)?;
    validate_tiers(&file.tiers)?;
    Ok(file.tiers)
}

fn validate_tiers(tiers: &[PricingTier]) -> Result<(), ConfigError> {
    if tiers.is_empty() {
        return Err(ConfigError::Validation(
            "at least one pricing tier is required".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    for tier in tiers {
        if tier.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pricing tier name must be non-empty".to_string(),
            ));
        }
        if !tier.price.is_finite() || tier.price < 0.0 {
            return Err(ConfigError::Validation(format!(
                "tier '{}' has invalid price {}",
                tier.name, tier.price
            )));
        }
        if !(0.0..=100.0).contains(&tier.allocation_percent) {
            return Err(ConfigError::Validation(format!(
                "tier '{}' has allocation {}; must be within 0-100",
                tier.name, tier.allocation_percent
            )));
        }
        if !seen_names.insert(tier.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate pricing tier: '{}'",
                tier.name
            )));
        }
    }

    Ok(())
}
