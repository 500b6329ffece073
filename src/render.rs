//! Presentation renderer
//!
//! Pure mapping from fetched weather data to display-ready records. No unit
//! conversion happens here: numbers arrive in the requested measurement system
//! and are only rounded and suffixed.

use serde::Serialize;
use std::fmt::{self, Display};

use crate::forecast::DEFAULT_FORECAST_DAYS;
use crate::format::{
    format_date, format_degrees, format_temperature, format_time, icon_url, round_half_up,
    DEFAULT_ICON_BASE_URL,
};
use crate::models::{CurrentConditions, DailyForecast, Forecast, MeasurementSystem};
use crate::session::{Panel, SessionState};

/// Current conditions ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentView {
    pub location: String,
    pub coordinates: String,
    pub icon_url: String,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    /// "min° / max°"
    pub range: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub pressure: String,
    pub cloud_cover: String,
    pub sunrise: String,
    pub sunset: String,
    pub uv_index: String,
}

/// One day of the forecast panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastCard {
    pub date: String,
    pub icon_url: String,
    pub temperature: String,
    pub high: String,
    pub low: String,
    pub description: String,
}

/// What the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelView {
    Empty,
    Loading,
    Ready {
        current: CurrentView,
        /// Empty when the forecast could not be fetched
        forecast: Vec<ForecastCard>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub units: MeasurementSystem,
    pub panel: PanelView,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    icon_base_url: String,
    forecast_days: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE_URL, DEFAULT_FORECAST_DAYS)
    }
}

impl Renderer {
    #[must_use]
    pub fn new(icon_base_url: impl Into<String>, forecast_days: usize) -> Self {
        Self {
            icon_base_url: icon_base_url.into(),
            forecast_days,
        }
    }

    #[must_use]
    pub fn render_current(
        &self,
        current: &CurrentConditions,
        units: MeasurementSystem,
    ) -> CurrentView {
        let offset = current.utc_offset();
        let temperature = &current.temperature;

        CurrentView {
            location: current.location.display_name(),
            coordinates: current.location.format_coordinates(),
            icon_url: icon_url(&self.icon_base_url, &current.condition.icon),
            description: current.condition.description.clone(),
            temperature: format_temperature(temperature.current, units),
            feels_like: format_temperature(temperature.feels_like, units),
            range: format!(
                "{} / {}",
                format_degrees(temperature.min),
                format_degrees(temperature.max)
            ),
            humidity: format!("{}%", current.humidity),
            wind: format!("{} {}", current.wind.speed, units.wind_speed_unit()),
            visibility: current.visibility.map_or_else(
                || "N/A".to_string(),
                |meters| format!("{:.1} km", f64::from(meters) / 1000.0),
            ),
            pressure: format!("{} hPa", current.pressure),
            cloud_cover: format!("{}%", current.cloud_cover),
            sunrise: format_time(current.sunrise, offset),
            sunset: format_time(current.sunset, offset),
            uv_index: current
                .uv_index
                .map_or_else(|| "N/A".to_string(), |uv| round_half_up(uv).to_string()),
        }
    }

    /// Render already aggregated days; dates are shown in `utc_offset_seconds`
    #[must_use]
    pub fn render_days(
        &self,
        days: &[DailyForecast],
        utc_offset_seconds: i32,
        units: MeasurementSystem,
    ) -> Vec<ForecastCard> {
        let offset = crate::format::utc_offset(utc_offset_seconds);
        days.iter()
            .map(|day| {
                let sample = &day.sample;
                ForecastCard {
                    date: format_date(sample.timestamp, offset),
                    icon_url: icon_url(&self.icon_base_url, &sample.condition.icon),
                    temperature: format_temperature(sample.temperature.current, units),
                    high: format_degrees(sample.temperature.max),
                    low: format_degrees(sample.temperature.min),
                    description: sample.condition.description.clone(),
                }
            })
            .collect()
    }

    /// Aggregate the raw forecast and render the resulting days
    #[must_use]
    pub fn render_forecast(&self, forecast: &Forecast, units: MeasurementSystem) -> Vec<ForecastCard> {
        let days = forecast.daily(self.forecast_days);
        self.render_days(&days, forecast.utc_offset_seconds, units)
    }

    #[must_use]
    pub fn render_state(&self, state: &SessionState) -> DashboardView {
        let panel = match &state.panel {
            Panel::Empty => PanelView::Empty,
            Panel::Loading => PanelView::Loading,
            // Label numbers with the system they were fetched in
            Panel::Ready {
                current,
                forecast,
                units,
            } => PanelView::Ready {
                current: self.render_current(current, *units),
                forecast: forecast
                    .as_ref()
                    .map(|forecast| self.render_forecast(forecast, *units))
                    .unwrap_or_default(),
            },
            Panel::Failed { message, .. } => PanelView::Failed {
                message: message.clone(),
            },
        };

        DashboardView {
            units: state.units,
            panel,
        }
    }
}

impl Display for CurrentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📍 {}", self.location)?;
        writeln!(f, "   {}", self.coordinates)?;
        writeln!(f, "   {} ({})", self.description, self.icon_url)?;
        writeln!(f)?;
        writeln!(f, "   🌡️  Temperature   {}", self.temperature)?;
        writeln!(f, "   🤔 Feels like    {}", self.feels_like)?;
        writeln!(f, "   ↕️  Min - Max     {}", self.range)?;
        writeln!(f, "   💧 Humidity      {}", self.humidity)?;
        writeln!(f, "   💨 Wind          {}", self.wind)?;
        writeln!(f, "   👁️  Visibility    {}", self.visibility)?;
        writeln!(f, "   🧭 Pressure      {}", self.pressure)?;
        writeln!(f, "   ☁️  Cloud cover   {}", self.cloud_cover)?;
        writeln!(f, "   🌅 Sunrise       {}", self.sunrise)?;
        writeln!(f, "   🌇 Sunset        {}", self.sunset)?;
        writeln!(f, "   🔆 UV index      {}", self.uv_index)
    }
}

impl Display for ForecastCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>6}  {} / {}  {}",
            self.date, self.temperature, self.high, self.low, self.description
        )
    }
}

impl Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.panel {
            PanelView::Empty => writeln!(f, "Search for a city to see the weather."),
            PanelView::Loading => writeln!(f, "Loading..."),
            PanelView::Failed { message } => writeln!(f, "❌ {message}"),
            PanelView::Ready { current, forecast } => {
                write!(f, "{current}")?;
                writeln!(f)?;
                if forecast.is_empty() {
                    return writeln!(f, "📅 Forecast unavailable");
                }
                writeln!(f, "📅 {}-day forecast", forecast.len())?;
                for card in forecast {
                    writeln!(f, "   {card}")?;
                }
                Ok(())
            }
        }
    }
}
