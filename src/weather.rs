//! Upstream response structures and conversion into the domain models
//!
//! The current-weather and 5-day/3-hour forecast bodies are consumed verbatim;
//! only the fields the dashboard shows are declared.

use chrono::{DateTime, Utc};

use crate::error::WeatherDashError;
use crate::models::{
    Condition, CurrentConditions, Forecast, ForecastSample, Location, SampleTemperature,
    TemperatureReading, Wind,
};
use crate::Result;

fn timestamp(seconds: i64, field: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        WeatherDashError::upstream(format!("Invalid timestamp in '{field}': {seconds}"))
    })
}

fn primary_condition(conditions: Vec<openweather::WeatherEntry>) -> Result<Condition> {
    conditions
        .into_iter()
        .next()
        .map(|entry| Condition {
            description: entry.description,
            icon: entry.icon,
        })
        .ok_or_else(|| WeatherDashError::upstream("Response has no weather condition"))
}

impl TryFrom<openweather::CurrentResponse> for CurrentConditions {
    type Error = WeatherDashError;

    fn try_from(response: openweather::CurrentResponse) -> Result<Self> {
        let location = Location {
            name: response.name,
            country: response.sys.country,
            latitude: response.coord.lat,
            longitude: response.coord.lon,
        };

        Ok(Self {
            location,
            observed_at: timestamp(response.dt, "dt")?,
            utc_offset_seconds: response.timezone,
            temperature: TemperatureReading {
                current: response.main.temp,
                feels_like: response.main.feels_like,
                min: response.main.temp_min,
                max: response.main.temp_max,
            },
            humidity: response.main.humidity,
            pressure: response.main.pressure,
            visibility: response.visibility,
            cloud_cover: response.clouds.map_or(0, |clouds| clouds.all),
            wind: Wind {
                speed: response.wind.speed,
                direction: response.wind.deg,
            },
            condition: primary_condition(response.weather)?,
            sunrise: timestamp(response.sys.sunrise, "sys.sunrise")?,
            sunset: timestamp(response.sys.sunset, "sys.sunset")?,
            uv_index: response.uvi,
        })
    }
}

impl TryFrom<openweather::ForecastResponse> for Forecast {
    type Error = WeatherDashError;

    fn try_from(response: openweather::ForecastResponse) -> Result<Self> {
        let samples = response
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastSample> {
                Ok(ForecastSample {
                    timestamp: timestamp(entry.dt, "list.dt")?,
                    temperature: SampleTemperature {
                        current: entry.main.temp,
                        min: entry.main.temp_min,
                        max: entry.main.temp_max,
                    },
                    condition: primary_condition(entry.weather)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let offset = response.city.and_then(|city| city.timezone).unwrap_or(0);
        Ok(Forecast::new(offset, samples))
    }
}

/// Upstream JSON schemas
pub mod openweather {
    use serde::Deserialize;

    /// Current weather response (`/weather`)
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub coord: Coord,
        pub weather: Vec<WeatherEntry>,
        pub main: MainReadings,
        /// Visibility in meters
        pub visibility: Option<u32>,
        pub wind: WindReadings,
        pub clouds: Option<Clouds>,
        pub dt: i64,
        pub sys: Sys,
        /// Shift in seconds from UTC
        #[serde(default)]
        pub timezone: i32,
        pub name: String,
        /// Only present on some plans; absent in the free tier
        pub uvi: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Coord {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct WeatherEntry {
        pub description: String,
        pub icon: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainReadings {
        pub temp: f64,
        pub feels_like: f64,
        pub temp_min: f64,
        pub temp_max: f64,
        pub pressure: u32,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindReadings {
        pub speed: f64,
        pub deg: Option<u16>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Clouds {
        pub all: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Sys {
        pub country: Option<String>,
        pub sunrise: i64,
        pub sunset: i64,
    }

    /// 5-day / 3-hour forecast response (`/forecast`)
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastEntry>,
        pub city: Option<City>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        pub dt: i64,
        pub main: ForecastMain,
        pub weather: Vec<WeatherEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastMain {
        pub temp: f64,
        pub temp_min: f64,
        pub temp_max: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct City {
        pub name: Option<String>,
        pub country: Option<String>,
        pub timezone: Option<i32>,
    }
}
