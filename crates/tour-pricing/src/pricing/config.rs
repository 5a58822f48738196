use rust_decimal::Decimal;

use super::policy::{PolicyKind, PricingPolicy};

/// Pricing configuration for a single tour, as read from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourPricingConfig {
    pub base_price: Decimal,
    pub policy: PricingPolicy,
    pub min_participants: u32,
    pub max_participants: u32,
    /// Catalog revision this configuration was read at.
    pub version: u32,
}

impl TourPricingConfig {
    /// Check the cross-field invariants a usable configuration must satisfy.
    pub fn validate(&self) -> Result<(), ConfigViolation> {
        if self.base_price <= Decimal::ZERO {
            return Err(ConfigViolation::NonPositiveBasePrice(self.base_price));
        }

        if self.min_participants == 0 || self.min_participants > self.max_participants {
            return Err(ConfigViolation::InvalidParticipantBounds {
                min: self.min_participants,
                max: self.max_participants,
            });
        }

        match self.policy {
            PricingPolicy::Fixed => Ok(()),
            PricingPolicy::BulkDiscount {
                threshold,
                percentage,
            } => {
                if threshold == 0 {
                    return Err(ConfigViolation::InvalidDiscountThreshold(threshold));
                }
                if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
                    return Err(ConfigViolation::DiscountPercentageOutOfRange(percentage));
                }
                Ok(())
            }
            PricingPolicy::GroupRequired { min, max } => {
                if min == 0 || min > max {
                    return Err(ConfigViolation::InvalidGroupBounds { min, max });
                }
                Ok(())
            }
        }
    }
}

/// Reasons a pricing configuration cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigViolation {
    #[error("base price must be greater than zero (found {0})")]
    NonPositiveBasePrice(Decimal),
    #[error("participant bounds must satisfy 1 <= min <= max (found {min}..={max})")]
    InvalidParticipantBounds { min: u32, max: u32 },
    #[error("bulk discount threshold must be at least 1 (found {0})")]
    InvalidDiscountThreshold(u32),
    #[error("bulk discount percentage must be within 0..=100 (found {0})")]
    DiscountPercentageOutOfRange(Decimal),
    #[error("group bounds must satisfy 1 <= min <= max (found {min}..={max})")]
    InvalidGroupBounds { min: u32, max: u32 },
    #[error("{} policy requires `{field}`", .policy.label())]
    MissingPolicyField {
        policy: PolicyKind,
        field: &'static str,
    },
    #[error("unknown pricing policy `{0}`")]
    UnknownPolicy(String),
}
