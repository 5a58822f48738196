use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::policy::PolicyKind;

const DISPLAY_SCALE: u32 = 2;

/// Outcome of a successful evaluation. Values are exact; see [`PricingResult::display`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub base_price: Decimal,
    pub participants: u32,
    pub price_per_person: Decimal,
    pub total_price: Decimal,
    pub discount_applied: Decimal,
    pub discount_percentage: Decimal,
    pub pricing_policy: PolicyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_discount_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_required_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_required_max: Option<u32>,
}

impl PricingResult {
    /// Presentation copy rounded to cents. Never feed these values back into pricing.
    pub fn display(&self) -> PricingDisplay {
        PricingDisplay {
            base_price: round_for_display(self.base_price),
            price_per_person: round_for_display(self.price_per_person),
            total_price: round_for_display(self.total_price),
            discount_applied: round_for_display(self.discount_applied),
            discount_percentage: round_for_display(self.discount_percentage),
        }
    }
}

/// Cent-rounded amounts for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingDisplay {
    pub base_price: Decimal,
    pub price_per_person: Decimal,
    pub total_price: Decimal,
    pub discount_applied: Decimal,
    pub discount_percentage: Decimal,
}

fn round_for_display(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // pad to a fixed two places so "540" renders as "540.00"
    rounded.rescale(DISPLAY_SCALE);
    rounded
}
