use serde_json::{json, Map, Value};

use super::config::ConfigViolation;

/// Deterministic evaluation failures; each carries the bound that was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("participants must be a positive whole number ({reason})")]
    InvalidInput { reason: String },
    #[error("this tour accepts between {min} and {max} participants (requested {requested})")]
    ParticipantsOutOfRange { min: u32, max: u32, requested: i64 },
    #[error("this tour requires a group of at least {min_required} participants (requested {requested})")]
    GroupMinNotMet { min_required: u32, requested: u32 },
    #[error("this tour accepts groups of at most {max_allowed} participants (requested {requested})")]
    GroupMaxExceeded { max_allowed: u32, requested: u32 },
    #[error("tour pricing configuration is invalid: {0}")]
    InvalidConfiguration(#[from] ConfigViolation),
    #[error("price computation overflowed for {participants} participants")]
    Overflow { participants: u32 },
}

impl PricingError {
    pub const fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "invalid_input",
            PricingError::ParticipantsOutOfRange { .. } => "participants_out_of_range",
            PricingError::GroupMinNotMet { .. } => "group_min_not_met",
            PricingError::GroupMaxExceeded { .. } => "group_max_exceeded",
            PricingError::InvalidConfiguration(_) => "invalid_configuration",
            PricingError::Overflow { .. } => "overflow",
        }
    }

    /// Violated bounds, keyed the way API clients render them.
    pub fn bounds(&self) -> Map<String, Value> {
        let value = match self {
            PricingError::ParticipantsOutOfRange {
                min,
                max,
                requested,
            } => json!({
                "minParticipants": min,
                "maxParticipants": max,
                "requested": requested,
            }),
            PricingError::GroupMinNotMet {
                min_required,
                requested,
            } => json!({ "minRequired": min_required, "requested": requested }),
            PricingError::GroupMaxExceeded {
                max_allowed,
                requested,
            } => json!({ "maxAllowed": max_allowed, "requested": requested }),
            PricingError::InvalidInput { .. }
            | PricingError::InvalidConfiguration(_)
            | PricingError::Overflow { .. } => json!({}),
        };

        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
