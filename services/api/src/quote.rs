use crate::infra::{
    load_catalog, InMemoryBookingRepository, InMemoryTourCatalog, LoggingBookingNotifier,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tour_pricing::booking::{BookingError, BookingIntakeService, IntakePolicy};
use tour_pricing::catalog::TourId;
use tour_pricing::config::AppConfig;
use tour_pricing::error::AppError;
use tour_pricing::pricing::PricingResult;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Tour identifier from the catalog
    #[arg(long)]
    pub(crate) tour_id: u64,
    /// Number of participants to price
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) participants: i64,
    /// Tour catalog CSV export (overrides TOUR_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the full pricing result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        tour_id,
        participants,
        catalog,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if catalog.is_some() {
        config.pricing.catalog_path = catalog;
    }

    let catalog = Arc::new(load_catalog(&config.pricing)?);
    let service = BookingIntakeService::new(
        catalog.clone(),
        Arc::new(InMemoryBookingRepository::default()),
        Arc::new(LoggingBookingNotifier),
        IntakePolicy {
            price_tolerance: config.pricing.price_tolerance,
        },
    );

    let tour_id = TourId(tour_id);
    match service.preview(tour_id, participants) {
        Ok(pricing) if json => match serde_json::to_string_pretty(&pricing) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Pricing payload unavailable: {}", err),
        },
        Ok(pricing) => {
            for line in render_quote(&catalog, tour_id, &pricing) {
                println!("{line}");
            }
        }
        Err(err) => println!("{}", render_rejection(&err)),
    }

    Ok(())
}

fn render_quote(
    catalog: &InMemoryTourCatalog,
    tour_id: TourId,
    pricing: &PricingResult,
) -> Vec<String> {
    let display = pricing.display();
    let name = catalog
        .listing(tour_id)
        .map(|listing| listing.name)
        .unwrap_or_else(|| format!("tour {tour_id}"));

    let mut lines = vec![format!(
        "Quote for {} (tour {}), {} participants",
        name, tour_id, pricing.participants
    )];

    let policy = pricing.pricing_policy.label();
    match (
        pricing.bulk_discount_threshold,
        pricing.group_required_min,
        pricing.group_required_max,
    ) {
        (Some(threshold), _, _) if pricing.discount_percentage.is_zero() => lines.push(format!(
            "- Policy: {} (discount starts at {} participants)",
            policy, threshold
        )),
        (Some(threshold), _, _) => lines.push(format!(
            "- Policy: {} ({}% off from {} participants)",
            policy,
            pricing.discount_percentage.normalize(),
            threshold
        )),
        (_, Some(min), Some(max)) => {
            lines.push(format!("- Policy: {} (groups of {} to {})", policy, min, max))
        }
        _ => lines.push(format!("- Policy: {}", policy)),
    }

    lines.push(format!("- Base price: {}", display.base_price));
    lines.push(format!("- Price per person: {}", display.price_per_person));
    lines.push(format!("- Total: {}", display.total_price));
    if !pricing.discount_applied.is_zero() {
        lines.push(format!("- Discount applied: {}", display.discount_applied));
    }
    lines
}

fn render_rejection(err: &BookingError) -> String {
    format!("Quote rejected ({}): {}", err.kind(), err)
}
