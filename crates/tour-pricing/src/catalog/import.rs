use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use super::{TourId, TourListing};
use crate::pricing::{ConfigViolation, PolicyFields, PricingPolicy, TourPricingConfig};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
    InvalidConfig {
        tour_id: TourId,
        source: ConfigViolation,
    },
    DuplicateTour(TourId),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read tour catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid tour catalog CSV: {}", err),
            CatalogImportError::InvalidField { line, field, value } => write!(
                f,
                "line {}: `{}` has invalid value '{}'",
                line, field, value
            ),
            CatalogImportError::InvalidConfig { tour_id, source } => {
                write!(f, "tour {} has invalid pricing: {}", tour_id, source)
            }
            CatalogImportError::DuplicateTour(tour_id) => {
                write!(f, "tour {} appears more than once", tour_id)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidConfig { source, .. } => Some(source),
            CatalogImportError::InvalidField { .. } | CatalogImportError::DuplicateTour(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Knobs applied while turning catalog rows into pricing configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Reject unknown policy names instead of pricing them as `fixed`.
    pub strict_policies: bool,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    tour_id: u64,
    name: String,
    base_price: String,
    pricing_policy: String,
    min_participants: u32,
    max_participants: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bulk_discount_threshold: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bulk_discount_percentage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    group_required_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    group_required_max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    version: Option<String>,
}

impl CatalogRow {
    fn into_listing(
        self,
        line: u64,
        options: ImportOptions,
    ) -> Result<TourListing, CatalogImportError> {
        let tour_id = TourId(self.tour_id);
        let base_price = Decimal::from_str(self.base_price.trim()).map_err(|_| {
            CatalogImportError::InvalidField {
                line,
                field: "base_price",
                value: self.base_price.clone(),
            }
        })?;

        let fields = PolicyFields {
            bulk_discount_threshold: parse_field(
                line,
                "bulk_discount_threshold",
                self.bulk_discount_threshold,
            )?,
            bulk_discount_percentage: parse_field(
                line,
                "bulk_discount_percentage",
                self.bulk_discount_percentage,
            )?,
            group_required_min: parse_field(line, "group_required_min", self.group_required_min)?,
            group_required_max: parse_field(line, "group_required_max", self.group_required_max)?,
        };

        let invalid = |source| CatalogImportError::InvalidConfig { tour_id, source };
        let policy = PricingPolicy::resolve(&self.pricing_policy, &fields, options.strict_policies)
            .map_err(invalid)?;

        let pricing = TourPricingConfig {
            base_price,
            policy,
            min_participants: self.min_participants,
            max_participants: self.max_participants,
            version: parse_field(line, "version", self.version)?.unwrap_or(1),
        };
        pricing.validate().map_err(invalid)?;

        Ok(TourListing {
            tour_id,
            name: self.name,
            pricing,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_field<T: FromStr>(
    line: u64,
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, CatalogImportError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| CatalogImportError::InvalidField { line, field, value })
    })
    .transpose()
}

/// Loads tour listings from a CSV export of the tours table.
pub struct TourCatalogImporter;

impl TourCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: ImportOptions,
    ) -> Result<Vec<TourListing>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, options)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        options: ImportOptions,
    ) -> Result<Vec<TourListing>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut listings = Vec::new();
        let mut seen: HashSet<TourId> = HashSet::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            let row: CatalogRow = record.deserialize(Some(&headers))?;
            let listing = row.into_listing(line, options)?;

            if !seen.insert(listing.tour_id) {
                return Err(CatalogImportError::DuplicateTour(listing.tour_id));
            }

            debug!(
                tour_id = %listing.tour_id,
                policy = listing.pricing.policy.kind().label(),
                "loaded tour pricing"
            );
            listings.push(listing);
        }

        Ok(listings)
    }
}
