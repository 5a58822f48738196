//! Tour pricing policies and the evaluator that turns a participant count into a price.

mod config;
mod error;
mod evaluator;
mod input;
mod policy;
mod result;

pub use config::{ConfigViolation, TourPricingConfig};
pub use error::PricingError;
pub use evaluator::evaluate;
pub use input::participants_from_value;
pub use policy::{PolicyFields, PolicyKind, PricingPolicy};
pub use result::{PricingDisplay, PricingResult};
