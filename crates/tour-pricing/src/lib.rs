//! Pricing policy evaluation and booking intake for a tour operator's site.

pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod telemetry;
