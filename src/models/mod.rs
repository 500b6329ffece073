//! Data models for the WeatherDash application
//!
//! This module contains the core domain models organized by concern:
//! - Units: Measurement system selecting temperature and wind units
//! - Location: Resolved place and the query used to look it up
//! - Conditions: Current weather readings for a location
//! - Forecast: 3-hour forecast samples and the per-day projection

pub mod conditions;
pub mod forecast;
pub mod location;
pub mod units;

// Re-export all public types for convenient access
pub use conditions::{Condition, CurrentConditions, TemperatureReading, Wind};
pub use forecast::{DailyForecast, Forecast, ForecastSample, SampleTemperature};
pub use location::{Location, LocationQuery};
pub use units::MeasurementSystem;
