use rust_decimal_macros::dec;
use tour_pricing::catalog::{CatalogImportError, ImportOptions, TourCatalogImporter, TourId};
use tour_pricing::pricing::{evaluate, ConfigViolation, PricingPolicy};

const HEADER: &str = "tour_id,name,base_price,pricing_policy,min_participants,max_participants,bulk_discount_threshold,bulk_discount_percentage,group_required_min,group_required_max,version\n";

fn catalog(rows: &str) -> String {
    format!("{HEADER}{rows}")
}

#[test]
fn imported_catalog_prices_each_policy() {
    let csv = catalog(
        "1,Old Town Walk,45.00,fixed,1,20,,,,,3\n\
2,Harbour Kayak,100.00,bulk_discount,1,30,6,10,,,1\n\
3,Vineyard Tasting,120.00,group_required,1,20,,,8,15,2\n",
    );

    let listings = TourCatalogImporter::from_reader(csv.as_bytes(), ImportOptions::default())
        .expect("catalog imports");
    assert_eq!(listings.len(), 3);

    let kayak = listings
        .iter()
        .find(|listing| listing.tour_id == TourId(2))
        .expect("kayak tour imported");
    assert_eq!(
        kayak.pricing.policy,
        PricingPolicy::BulkDiscount {
            threshold: 6,
            percentage: dec!(10)
        }
    );
    let quote = evaluate(&kayak.pricing, 8).expect("kayak tour prices");
    assert_eq!(quote.total_price, dec!(720));

    let tasting = listings
        .iter()
        .find(|listing| listing.tour_id == TourId(3))
        .expect("tasting imported");
    assert_eq!(tasting.pricing.version, 2);
    assert!(evaluate(&tasting.pricing, 7).is_err());
}

#[test]
fn unknown_policy_is_rejected_in_strict_mode() {
    let csv = catalog("9,Mystery Tour,60.00,surge,1,10,,,,,1\n");

    let lenient = TourCatalogImporter::from_reader(csv.as_bytes(), ImportOptions::default())
        .expect("lenient import succeeds");
    assert_eq!(lenient[0].pricing.policy, PricingPolicy::Fixed);

    let strict = TourCatalogImporter::from_reader(
        csv.as_bytes(),
        ImportOptions {
            strict_policies: true,
        },
    );
    match strict {
        Err(CatalogImportError::InvalidConfig {
            tour_id,
            source: ConfigViolation::UnknownPolicy(policy),
        }) => {
            assert_eq!(tour_id, TourId(9));
            assert_eq!(policy, "surge");
        }
        other => panic!("expected unknown policy error, got {other:?}"),
    }
}

#[test]
fn inverted_participant_bounds_fail_the_import() {
    let csv = catalog("4,Backwards Tour,50.00,fixed,12,4,,,,,1\n");

    match TourCatalogImporter::from_reader(csv.as_bytes(), ImportOptions::default()) {
        Err(CatalogImportError::InvalidConfig { tour_id, source }) => {
            assert_eq!(tour_id, TourId(4));
            assert!(matches!(
                source,
                ConfigViolation::InvalidParticipantBounds { min: 12, max: 4 }
            ));
        }
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn bundled_sample_catalog_imports_cleanly() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/tours.csv");
    let listings = TourCatalogImporter::from_path(
        path,
        ImportOptions {
            strict_policies: true,
        },
    )
    .expect("sample catalog imports");

    assert_eq!(listings.len(), 4);
    let crawl = listings
        .iter()
        .find(|listing| listing.tour_id == TourId(4))
        .expect("food crawl imported");
    let quote = evaluate(&crawl.pricing, 8).expect("food crawl prices");
    assert_eq!(quote.price_per_person, dec!(56.4375));
    assert_eq!(quote.display().total_price.to_string(), "451.50");
}
