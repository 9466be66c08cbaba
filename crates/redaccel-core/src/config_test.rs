use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.http_timeout_secs, 10);
    assert_eq!(cfg.traffic_timeout_secs, 10);
    assert_eq!(cfg.reddit_user_agent, "redaccel/0.1 (thread-ranker)");
    assert!(cfg.reddit_client_id.is_none());
    assert!(cfg.traffic_api_token.is_none());
    assert_eq!(cfg.traffic_api_base_url, "https://apiv2.ahrefs.com");
    assert!(cfg.openai_api_key.is_none());
    assert_eq!(cfg.openai_base_url, "https://api.openai.com/v1");
    assert_eq!(cfg.openai_model, "gpt-4o-mini");
    assert_eq!(cfg.observation_timeout_secs, 15);
    assert_eq!(cfg.max_concurrent_observations, 10);
    assert_eq!(cfg.max_observations_per_persona, 3);
    assert_eq!(cfg.target_population, 1200);
    assert_eq!(cfg.pricing_path.to_str(), Some("./config/pricing.yaml"));
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("REDACCEL_ENV", "production");
    map.insert("REDACCEL_MAX_CONCURRENT_OBSERVATIONS", "4");
    map.insert("REDACCEL_TARGET_POPULATION", "5000");
    map.insert("OPENAI_MODEL", "gpt-4o");
    map.insert("TRAFFIC_API_TOKEN", "tok");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.max_concurrent_observations, 4);
    assert_eq!(cfg.target_population, 5000);
    assert_eq!(cfg.openai_model, "gpt-4o");
    assert_eq!(cfg.traffic_api_token.as_deref(), Some("tok"));
}

#[test]
fn build_app_config_rejects_invalid_number() {
    let mut map = HashMap::new();
    map.insert("REDACCEL_OBSERVATION_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "REDACCEL_OBSERVATION_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar(REDACCEL_OBSERVATION_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn zero_concurrency_is_raised_to_one() {
    let mut map = HashMap::new();
    map.insert("REDACCEL_MAX_CONCURRENT_OBSERVATIONS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrent_observations, 1);
}

#[test]
fn blank_credentials_are_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.openai_api_key.is_none());
}

#[test]
fn reddit_credentials_require_both_halves_and_no_placeholder() {
    let mut map = HashMap::new();
    map.insert("REDDIT_CLIENT_ID", "abc");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.reddit_credentials().is_none());

    map.insert("REDDIT_CLIENT_SECRET", "shh");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.reddit_credentials(), Some(("abc", "shh")));

    map.insert("REDDIT_CLIENT_ID", "your_client_id_here");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.reddit_credentials().is_none());
}

#[test]
fn debug_output_redacts_credentials() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "sk-very-secret");
    map.insert("TRAFFIC_API_TOKEN", "traffic-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("sk-very-secret"));
    assert!(!rendered.contains("traffic-secret"));
    assert!(rendered.contains("[redacted]"));
}
