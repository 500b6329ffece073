//! Weather forecast model

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Condition;
use crate::format::utc_offset;

/// Temperatures of a single forecast sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleTemperature {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

/// One 3-hour forecast reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: SampleTemperature,
    pub condition: Condition,
}

/// Raw 5-day forecast as returned by the upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Offset of the location's local time from UTC, in seconds
    pub utc_offset_seconds: i32,
    /// Samples in chronological order
    pub samples: Vec<ForecastSample>,
}

impl Forecast {
    #[must_use]
    pub fn new(utc_offset_seconds: i32, samples: Vec<ForecastSample>) -> Self {
        Self {
            utc_offset_seconds,
            samples,
        }
    }

    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        utc_offset(self.utc_offset_seconds)
    }

    /// One representative sample per local calendar day
    #[must_use]
    pub fn daily(&self, max_days: usize) -> Vec<DailyForecast> {
        crate::forecast::aggregate_daily(&self.samples, self.utc_offset(), max_days)
    }
}

/// The sample closest to local noon for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Local calendar date of the sample
    pub date: NaiveDate,
    pub sample: ForecastSample,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_daily_uses_forecast_offset() {
        let start = Utc.with_ymd_and_hms(2023, 10, 16, 0, 0, 0).unwrap();
        let samples = (0..16)
            .map(|i| ForecastSample {
                timestamp: start + Duration::hours(3 * i),
                temperature: SampleTemperature {
                    current: i as f64,
                    min: 0.0,
                    max: 0.0,
                },
                condition: Condition {
                    description: "cielo claro".into(),
                    icon: "01d".into(),
                },
            })
            .collect();

        // UTC-6: the first two samples fall on Oct 15 local time
        let daily = Forecast::new(-21_600, samples).daily(5);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());
        // 18:00 UTC is local noon on Oct 16
        assert_eq!(daily[1].sample.temperature.current, 6.0);
    }
}
