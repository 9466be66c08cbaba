use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric variable is present but unparseable.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric variable is present but unparseable.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; credentials stay `None` when unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("REDACCEL_ENV", "development"));
    let log_level = or_default("REDACCEL_LOG_LEVEL", "info");

    let http_timeout_secs = parse_u64("REDACCEL_HTTP_TIMEOUT_SECS", "10")?;
    let traffic_timeout_secs = parse_u64("REDACCEL_TRAFFIC_TIMEOUT_SECS", "10")?;

    let reddit_user_agent = or_default("REDDIT_USER_AGENT", "redaccel/0.1 (thread-ranker)");
    let reddit_client_id = optional("REDDIT_CLIENT_ID");
    let reddit_client_secret = optional("REDDIT_CLIENT_SECRET");

    let traffic_api_token = optional("TRAFFIC_API_TOKEN");
    let traffic_api_base_url = or_default("TRAFFIC_API_BASE_URL", "https://apiv2.ahrefs.com");

    let openai_api_key = optional("OPENAI_API_KEY");
    let openai_base_url = or_default("OPENAI_BASE_URL", "https://api.openai.com/v1");
    let openai_model = or_default("OPENAI_MODEL", "gpt-4o-mini");

    let observation_timeout_secs = parse_u64("REDACCEL_OBSERVATION_TIMEOUT_SECS", "15")?;
    let max_concurrent_observations =
        parse_usize("REDACCEL_MAX_CONCURRENT_OBSERVATIONS", "10")?.max(1);
    let max_observations_per_persona =
        parse_usize("REDACCEL_MAX_OBSERVATIONS_PER_PERSONA", "3")?.max(1);
    let target_population = parse_u64("REDACCEL_TARGET_POPULATION", "1200")?;
    let pricing_path = PathBuf::from(or_default(
        "REDACCEL_PRICING_PATH",
        "./config/pricing.yaml",
    ));

    Ok(AppConfig {
        env,
        log_level,
        http_timeout_secs,
        traffic_timeout_secs,
        reddit_user_agent,
        reddit_client_id,
        reddit_client_secret,
        traffic_api_token,
        traffic_api_base_url,
        openai_api_key,
        openai_base_url,
        openai_model,
        observation_timeout_secs,
        max_concurrent_observations,
        max_observations_per_persona,
        target_population,
        pricing_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
