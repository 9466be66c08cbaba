//! Fixed persona catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

/// One of the six simulated customer archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    EarlyAdopter,
    Skeptic,
    PowerUser,
    BudgetConscious,
    CasualUser,
    EnterpriseBuyer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSensitivity {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Behavioral priors for a persona. Entries are process-wide constants.
#[derive(Debug, Serialize)]
pub struct PersonaDefinition {
    pub persona: Persona,
    pub name: &'static str,
    pub description: &'static str,
    pub traits: &'static [&'static str],
    /// Baseline purchase probability in `[0, 1]`.
    pub purchase_probability: f64,
    pub price_sensitivity: PriceSensitivity,
}

static EARLY_ADOPTER: PersonaDefinition = PersonaDefinition {
    persona: Persona::EarlyAdopter,
    name: "Early Adopter",
    description: "Tech-savvy, loves trying new products, values innovation",
    traits: &["enthusiastic", "tech-forward", "willing to pay premium", "influencer"],
    purchase_probability: 0.75,
    price_sensitivity: PriceSensitivity::Low,
};

static SKEPTIC: PersonaDefinition = PersonaDefinition {
    persona: Persona::Skeptic,
    name: "Skeptic",
    description: "Cautious, needs proof, compares alternatives thoroughly",
    traits: &["analytical", "risk-averse", "price-conscious", "detail-oriented"],
    purchase_probability: 0.25,
    price_sensitivity: PriceSensitivity::High,
};

static POWER_USER: PersonaDefinition = PersonaDefinition {
    persona: Persona::PowerUser,
    name: "Power User",
    description: "Uses products extensively, values features and efficiency",
    traits: &["feature-focused", "efficiency-driven", "loyal", "demanding"],
    purchase_probability: 0.65,
    price_sensitivity: PriceSensitivity::Medium,
};

static BUDGET_CONSCIOUS: PersonaDefinition = PersonaDefinition {
    persona: Persona::BudgetConscious,
    name: "Budget-Conscious",
    description: "Price-sensitive, looks for value, compares deals",
    traits: &["price-focused", "value-seeker", "deal-hunter", "practical"],
    purchase_probability: 0.35,
    price_sensitivity: PriceSensitivity::VeryHigh,
};

static CASUAL_USER: PersonaDefinition = PersonaDefinition {
    persona: Persona::CasualUser,
    name: "Casual User",
    description: "Uses products occasionally, values simplicity",
    traits: &["simple", "convenience-focused", "occasional", "easy-going"],
    purchase_probability: 0.50,
    price_sensitivity: PriceSensitivity::Medium,
};

static ENTERPRISE_BUYER: PersonaDefinition = PersonaDefinition {
    persona: Persona::EnterpriseBuyer,
    name: "Enterprise Buyer",
    description: "Makes decisions for teams, values ROI and security",
    traits: &["ROI-focused", "security-conscious", "scalability", "support"],
    purchase_probability: 0.55,
    price_sensitivity: PriceSensitivity::Low,
};

impl Persona {
    /// Every persona, in catalog order.
    pub const ALL: [Persona; 6] = [
        Persona::EarlyAdopter,
        Persona::Skeptic,
        Persona::PowerUser,
        Persona::BudgetConscious,
        Persona::CasualUser,
        Persona::EnterpriseBuyer,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Persona::EarlyAdopter => "early_adopter",
            Persona::Skeptic => "skeptic",
            Persona::PowerUser => "power_user",
            Persona::BudgetConscious => "budget_conscious",
            Persona::CasualUser => "casual_user",
            Persona::EnterpriseBuyer => "enterprise_buyer",
        }
    }

    #[must_use]
    pub fn definition(self) -> &'static PersonaDefinition {
        match self {
            Persona::EarlyAdopter => &EARLY_ADOPTER,
            Persona::Skeptic => &SKEPTIC,
            Persona::PowerUser => &POWER_USER,
            Persona::BudgetConscious => &BUDGET_CONSCIOUS,
            Persona::CasualUser => &CASUAL_USER,
            Persona::EnterpriseBuyer => &ENTERPRISE_BUYER,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Persona {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Persona::ALL
            .into_iter()
            .find(|p| p.key() == wanted)
            .ok_or_else(|| FeedbackError::UnknownPersona(s.to_string()))
    }
}
