//! `WeatherDash` - current conditions and 5-day forecast dashboard
//!
//! This library fetches current weather and a 3-hour forecast series from the
//! upstream weather service, reduces the series to one sample per day and turns
//! both into display-ready records.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod models;
pub mod preferences;
pub mod render;
pub mod session;
pub mod weather;

// Re-export core types for public API
pub use api::{WeatherApiClient, WeatherProvider};
pub use config::DashboardConfig;
pub use error::WeatherDashError;
pub use forecast::aggregate_daily;
pub use models::{
    CurrentConditions, DailyForecast, Forecast, ForecastSample, Location, LocationQuery,
    MeasurementSystem,
};
pub use preferences::{PreferenceStore, Theme};
pub use render::{DashboardView, Renderer};
pub use session::{Dashboard, Panel, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherDashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
