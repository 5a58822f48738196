use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryBookingRepository, LoggingBookingNotifier};
use crate::routes::with_booking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tour_pricing::booking::{BookingIntakeService, IntakePolicy};
use tour_pricing::config::AppConfig;
use tour_pricing::error::AppError;
use tour_pricing::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(&config.pricing)?);
    let tour_count = catalog.len();
    let repository = Arc::new(InMemoryBookingRepository::default());
    let notifier = Arc::new(LoggingBookingNotifier);
    let booking_service = Arc::new(BookingIntakeService::new(
        catalog,
        repository,
        notifier,
        IntakePolicy {
            price_tolerance: config.pricing.price_tolerance,
        },
    ));

    let tolerance = booking_service.policy().price_tolerance;
    let app = with_booking_routes(booking_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        tours = tour_count,
        tolerance = %tolerance,
        "tour pricing service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
