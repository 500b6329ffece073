//! Current weather conditions model

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::Location;
use crate::format::utc_offset;

/// Temperature readings, in the units the request was made with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub current: f64,
    pub feels_like: f64,
    pub min: f64,
    pub max: f64,
}

/// Wind measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// m/s for metric, mph for imperial
    pub speed: f64,
    /// Direction in degrees, when reported
    pub direction: Option<u16>,
}

/// Primary weather condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Human-readable description in the requested language
    pub description: String,
    /// Upstream icon code (e.g. "01d")
    pub icon: String,
}

/// Current conditions for one location.
///
/// Produced once per successful fetch and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: Location,
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Offset of the location's local time from UTC, in seconds
    pub utc_offset_seconds: i32,
    pub temperature: TemperatureReading,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Visibility in meters
    pub visibility: Option<u32>,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: u8,
    pub wind: Wind,
    pub condition: Condition,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub uv_index: Option<f64>,
}

impl CurrentConditions {
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        utc_offset(self.utc_offset_seconds)
    }
}
