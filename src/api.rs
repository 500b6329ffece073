//! Weather API client
//!
//! Issues the three upstream queries the dashboard needs (current weather by
//! city name, current weather by coordinates, forecast by coordinates) and maps
//! HTTP failures onto [`WeatherDashError`].

use crate::config::WeatherConfig;
use crate::error::WeatherDashError;
use crate::models::{CurrentConditions, Forecast, LocationQuery, MeasurementSystem};
use crate::weather::openweather;
use crate::Result;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Source of current conditions and forecasts.
///
/// Implemented by [`WeatherApiClient`]; the session is generic over it so the
/// request sequencing can be exercised without a network.
#[allow(async_fn_in_trait)]
pub trait WeatherProvider {
    /// Current conditions for a city name or coordinate pair
    async fn current_weather(
        &self,
        query: &LocationQuery,
        units: MeasurementSystem,
    ) -> Result<CurrentConditions>;

    /// Raw 5-day / 3-hour forecast for a coordinate pair
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        units: MeasurementSystem,
    ) -> Result<Forecast>;
}

/// Upstream endpoint being queried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Weather,
    Forecast,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Weather => "weather",
            Endpoint::Forecast => "forecast",
        }
    }

    /// Map a non-success status. Only the current-weather lookup reports a
    /// missing location; everything else is an upstream failure.
    fn error_for(self, status: StatusCode, body: &str) -> WeatherDashError {
        match (self, status) {
            (Endpoint::Weather, StatusCode::NOT_FOUND) => {
                WeatherDashError::not_found(format!("upstream returned 404: {body}"))
            }
            _ => WeatherDashError::upstream_status(
                format!("{} request failed with {status}: {body}", self.path()),
                status.as_u16(),
            ),
        }
    }
}

/// HTTP client for the upstream weather service
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                WeatherDashError::config(
                    "Weather API key is missing. Set weather.api_key or WEATHERDASH_WEATHER__API_KEY",
                )
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("WeatherDash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherDashError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
        })
    }

    fn current_url(&self, query: &LocationQuery, units: MeasurementSystem) -> String {
        let location = match query {
            LocationQuery::Name(name) => format!("q={}", urlencoding::encode(name)),
            LocationQuery::Coordinates(lat, lon) => format!("lat={lat}&lon={lon}"),
        };
        self.url(Endpoint::Weather, &location, units)
    }

    fn forecast_url(&self, latitude: f64, longitude: f64, units: MeasurementSystem) -> String {
        self.url(
            Endpoint::Forecast,
            &format!("lat={latitude}&lon={longitude}"),
            units,
        )
    }

    fn url(&self, endpoint: Endpoint, location: &str, units: MeasurementSystem) -> String {
        format!(
            "{}/{}?{}&appid={}&units={}&lang={}",
            self.base_url,
            endpoint.path(),
            location,
            urlencoding::encode(&self.api_key),
            units.as_query(),
            urlencoding::encode(&self.language),
        )
    }

    /// Send a GET request and decode the JSON body
    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint, url: &str) -> Result<T> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("{} request failed: {}", endpoint.path(), e);
            WeatherDashError::upstream(format!("{} request failed: {e}", endpoint.path()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read {} error body: {}", endpoint.path(), e);
                String::new()
            });
            debug!("{} returned {}: {}", endpoint.path(), status, body);
            return Err(endpoint.error_for(status, &body));
        }

        let parsed = response.json::<T>().await.map_err(|e| {
            WeatherDashError::upstream(format!(
                "Invalid {} response from weather API: {e}",
                endpoint.path()
            ))
        })?;

        let elapsed = start_time.elapsed();
        debug!("{} answered in {:.3}s", endpoint.path(), elapsed.as_secs_f64());
        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(parsed)
    }
}

impl WeatherProvider for WeatherApiClient {
    #[instrument(skip(self, query), fields(query = %query))]
    async fn current_weather(
        &self,
        query: &LocationQuery,
        units: MeasurementSystem,
    ) -> Result<CurrentConditions> {
        info!("Getting current weather for {} ({})", query, units);

        let url = self.current_url(query, units);
        let response: openweather::CurrentResponse = self.fetch(Endpoint::Weather, &url).await?;
        let current = CurrentConditions::try_from(response)?;

        info!(
            "Resolved {} at ({:.4}, {:.4})",
            current.location.display_name(),
            current.location.latitude,
            current.location.longitude
        );
        Ok(current)
    }

    #[instrument(skip(self))]
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        units: MeasurementSystem,
    ) -> Result<Forecast> {
        info!("Getting 5-day forecast for coordinates: {:.4}, {:.4}", latitude, longitude);

        let url = self.forecast_url(latitude, longitude, units);
        let response: openweather::ForecastResponse = self.fetch(Endpoint::Forecast, &url).await?;
        let forecast = Forecast::try_from(response)?;

        debug!("Received {} forecast samples", forecast.samples.len());
        Ok(forecast)
    }
}
