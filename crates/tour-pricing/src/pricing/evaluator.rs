use rust_decimal::Decimal;

use super::config::TourPricingConfig;
use super::error::PricingError;
use super::policy::PricingPolicy;
use super::result::PricingResult;

/// Per-person price selected by the policy, before it is multiplied out.
struct AppliedRate {
    price_per_person: Decimal,
    discount_percentage: Decimal,
}

impl AppliedRate {
    fn undiscounted(base_price: Decimal) -> Self {
        Self {
            price_per_person: base_price,
            discount_percentage: Decimal::ZERO,
        }
    }
}

/// Price a request for `participants` against a tour's pricing configuration.
///
/// Pure: no I/O, no shared state, identical inputs give identical results.
pub fn evaluate(
    config: &TourPricingConfig,
    participants: i64,
) -> Result<PricingResult, PricingError> {
    if participants <= 0 {
        return Err(PricingError::InvalidInput {
            reason: format!("received {participants}"),
        });
    }

    config.validate()?;

    let count = u32::try_from(participants)
        .ok()
        .filter(|count| (config.min_participants..=config.max_participants).contains(count))
        .ok_or(PricingError::ParticipantsOutOfRange {
            min: config.min_participants,
            max: config.max_participants,
            requested: participants,
        })?;

    let rate = match config.policy {
        PricingPolicy::Fixed => AppliedRate::undiscounted(config.base_price),
        PricingPolicy::BulkDiscount {
            threshold,
            percentage,
        } => {
            if count >= threshold {
                let multiplier = Decimal::ONE - percentage / Decimal::ONE_HUNDRED;
                AppliedRate {
                    price_per_person: config
                        .base_price
                        .checked_mul(multiplier)
                        .ok_or(PricingError::Overflow {
                            participants: count,
                        })?,
                    discount_percentage: percentage,
                }
            } else {
                AppliedRate::undiscounted(config.base_price)
            }
        }
        PricingPolicy::GroupRequired { min, max } => {
            if count < min {
                return Err(PricingError::GroupMinNotMet {
                    min_required: min,
                    requested: count,
                });
            }
            if count > max {
                return Err(PricingError::GroupMaxExceeded {
                    max_allowed: max,
                    requested: count,
                });
            }
            AppliedRate::undiscounted(config.base_price)
        }
    };

    let headcount = Decimal::from(count);
    let overflow = PricingError::Overflow {
        participants: count,
    };
    let total_price = rate
        .price_per_person
        .checked_mul(headcount)
        .ok_or_else(|| overflow.clone())?;
    let discount_applied = (config.base_price - rate.price_per_person)
        .checked_mul(headcount)
        .ok_or(overflow)?;

    let (bulk_discount_threshold, group_required_min, group_required_max) = match config.policy {
        PricingPolicy::Fixed => (None, None, None),
        PricingPolicy::BulkDiscount { threshold, .. } => (Some(threshold), None, None),
        PricingPolicy::GroupRequired { min, max } => (None, Some(min), Some(max)),
    };

    Ok(PricingResult {
        base_price: config.base_price,
        participants: count,
        price_per_person: rate.price_per_person,
        total_price,
        discount_applied,
        discount_percentage: rate.discount_percentage,
        pricing_policy: config.policy.kind(),
        bulk_discount_threshold,
        group_required_min,
        group_required_max,
    })
}
