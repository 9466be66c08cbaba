use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generator API error: {0}")]
    Generator(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing API key: {0}")]
    MissingApiKey(String),

    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    #[error("invalid product: {0}")]
    InvalidProduct(String),

    #[error("at least one pricing tier is required")]
    NoPricingTiers,

    #[error("invalid conversion rate override: {0}")]
    InvalidConversionRate(f64),
}
