use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::ConfigViolation;

/// Name of a pricing rule variant as it appears on the wire and in catalog exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Fixed,
    BulkDiscount,
    GroupRequired,
}

impl PolicyKind {
    pub const fn label(self) -> &'static str {
        match self {
            PolicyKind::Fixed => "fixed",
            PolicyKind::BulkDiscount => "bulk_discount",
            PolicyKind::GroupRequired => "group_required",
        }
    }

    /// Parse a policy name, tolerating case, surrounding whitespace, and `-`/space separators.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(['-', ' '], "_");
        match normalized.as_str() {
            "fixed" => Some(Self::Fixed),
            "bulk_discount" | "bulkdiscount" => Some(Self::BulkDiscount),
            "group_required" | "grouprequired" => Some(Self::GroupRequired),
            _ => None,
        }
    }
}

/// Rule governing how a tour's price is derived from the participant count.
///
/// Policy-specific parameters live on the variant that uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingPolicy {
    Fixed,
    BulkDiscount { threshold: u32, percentage: Decimal },
    GroupRequired { min: u32, max: u32 },
}

impl PricingPolicy {
    pub const fn kind(&self) -> PolicyKind {
        match self {
            PricingPolicy::Fixed => PolicyKind::Fixed,
            PricingPolicy::BulkDiscount { .. } => PolicyKind::BulkDiscount,
            PricingPolicy::GroupRequired { .. } => PolicyKind::GroupRequired,
        }
    }

    /// Build a policy from the flat column layout used by catalog exports.
    ///
    /// An unrecognized policy name resolves to `Fixed` with a warning unless
    /// `strict` is set, in which case it is reported as a configuration error.
    pub fn resolve(
        raw_policy: &str,
        fields: &PolicyFields,
        strict: bool,
    ) -> Result<Self, ConfigViolation> {
        let kind = match PolicyKind::parse(raw_policy) {
            Some(kind) => kind,
            None if strict => return Err(ConfigViolation::UnknownPolicy(raw_policy.to_string())),
            None => {
                warn!(policy = raw_policy, "unknown pricing policy, falling back to fixed pricing");
                PolicyKind::Fixed
            }
        };

        match kind {
            PolicyKind::Fixed => Ok(PricingPolicy::Fixed),
            PolicyKind::BulkDiscount => Ok(PricingPolicy::BulkDiscount {
                threshold: fields
                    .bulk_discount_threshold
                    .ok_or(ConfigViolation::MissingPolicyField {
                        policy: kind,
                        field: "bulk_discount_threshold",
                    })?,
                percentage: fields
                    .bulk_discount_percentage
                    .ok_or(ConfigViolation::MissingPolicyField {
                        policy: kind,
                        field: "bulk_discount_percentage",
                    })?,
            }),
            PolicyKind::GroupRequired => Ok(PricingPolicy::GroupRequired {
                min: fields
                    .group_required_min
                    .ok_or(ConfigViolation::MissingPolicyField {
                        policy: kind,
                        field: "group_required_min",
                    })?,
                max: fields
                    .group_required_max
                    .ok_or(ConfigViolation::MissingPolicyField {
                        policy: kind,
                        field: "group_required_max",
                    })?,
            }),
        }
    }
}

/// Optional policy columns; only the ones matching the selected policy are read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFields {
    pub bulk_discount_threshold: Option<u32>,
    pub bulk_discount_percentage: Option<Decimal>,
    pub group_required_min: Option<u32>,
    pub group_required_max: Option<u32>,
}
