//! Forecast aggregation
//!
//! Collapses the 3-hour forecast series into one representative sample per
//! local calendar day: the sample whose local hour is closest to noon.

use chrono::{FixedOffset, NaiveDate, Timelike};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{DailyForecast, ForecastSample};

/// Number of days shown by default
pub const DEFAULT_FORECAST_DAYS: usize = 5;

const NOON: i64 = 12;

/// Pick one sample per local calendar day, keeping the first `max_days`
/// distinct days in the order they appear.
///
/// Input is expected in chronological order. Within a day the sample with the
/// smallest `|hour - 12|` wins; on a tie the earlier sample is kept.
#[must_use]
pub fn aggregate_daily(
    samples: &[ForecastSample],
    offset: FixedOffset,
    max_days: usize,
) -> Vec<DailyForecast> {
    let mut days: Vec<DailyForecast> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let local = sample.timestamp.with_timezone(&offset);
        let date = local.date_naive();
        let distance = noon_distance(local.hour());

        match index.get(&date) {
            Some(&slot) => {
                let best = &mut days[slot];
                let best_distance = noon_distance(best.sample.timestamp.with_timezone(&offset).hour());
                if distance < best_distance {
                    best.sample = sample.clone();
                }
            }
            None => {
                index.insert(date, days.len());
                days.push(DailyForecast {
                    date,
                    sample: sample.clone(),
                });
            }
        }
    }

    debug!(
        "Aggregated {} samples into {} days (keeping {})",
        samples.len(),
        days.len(),
        max_days.min(days.len())
    );

    days.truncate(max_days);
    days
}

fn noon_distance(hour: u32) -> i64 {
    (i64::from(hour) - NOON).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::utc_offset;
    use crate::models::{Condition, SampleTemperature};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn sample(timestamp: DateTime<Utc>, temp: f64) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature: SampleTemperature {
                current: temp,
                min: temp - 1.0,
                max: temp + 1.0,
            },
            condition: Condition {
                description: "cielo claro".to_string(),
                icon: "01d".to_string(),
            },
        }
    }

    /// `days` days of 3-hour samples starting at midnight UTC, temperature = index
    fn series(start: DateTime<Utc>, days: i64) -> Vec<ForecastSample> {
        (0..days * 8)
            .map(|i| sample(start + Duration::hours(3 * i), i as f64))
            .collect()
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 10, 16, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_picks_noon_sample_per_day() {
        let samples = series(midnight(), 5);
        let daily = aggregate_daily(&samples, utc_offset(0), DEFAULT_FORECAST_DAYS);

        assert_eq!(daily.len(), 5);
        for (day, entry) in daily.iter().enumerate() {
            assert_eq!(entry.sample.timestamp.hour(), 12);
            assert_eq!(
                entry.date,
                NaiveDate::from_ymd_opt(2023, 10, 16 + day as u32).unwrap()
            );
        }
    }

    #[test]
    fn test_truncates_to_first_five_days() {
        let samples = series(midnight(), 7);
        let daily = aggregate_daily(&samples, utc_offset(0), DEFAULT_FORECAST_DAYS);

        assert_eq!(daily.len(), 5);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2023, 10, 16).unwrap());
        assert_eq!(daily[4].date, NaiveDate::from_ymd_opt(2023, 10, 20).unwrap());
    }

    #[test]
    fn test_three_days_yield_three_entries() {
        let samples = series(midnight(), 3);
        let daily = aggregate_daily(&samples, utc_offset(0), DEFAULT_FORECAST_DAYS);
        assert_eq!(daily.len(), 3);
    }

    #[test]
    fn test_empty_series() {
        assert!(aggregate_daily(&[], utc_offset(0), DEFAULT_FORECAST_DAYS).is_empty());
    }

    #[test]
    fn test_tie_keeps_earlier_sample() {
        let day = midnight();
        let samples = vec![
            sample(day + Duration::hours(9), 9.0),
            sample(day + Duration::hours(15), 15.0),
        ];
        let daily = aggregate_daily(&samples, utc_offset(0), DEFAULT_FORECAST_DAYS);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].sample.temperature.current, 9.0);
    }

    #[test]
    fn test_later_closer_sample_replaces_earlier() {
        let day = midnight();
        let samples = vec![
            sample(day + Duration::hours(6), 6.0),
            sample(day + Duration::hours(9), 9.0),
            sample(day + Duration::hours(13), 13.0),
            sample(day + Duration::hours(21), 21.0),
        ];
        let daily = aggregate_daily(&samples, utc_offset(0), DEFAULT_FORECAST_DAYS);
        assert_eq!(daily[0].sample.temperature.current, 13.0);
    }

    #[test]
    fn test_days_follow_location_offset() {
        // UTC-5: the first local day starts at 19:00 the previous evening
        let samples = series(midnight(), 2);
        let offset = utc_offset(-5 * 3600);
        let daily = aggregate_daily(&samples, offset, DEFAULT_FORECAST_DAYS);

        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());
        // 2023-10-16 local noon is 17:00 UTC; the 15:00 and 18:00 samples sit at
        // local 10:00 and 13:00, so 13:00 wins with distance 1.
        assert_eq!(
            daily[1].sample.timestamp,
            Utc.with_ymd_and_hms(2023, 10, 16, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_each_day_has_minimal_noon_distance() {
        let start = Utc.with_ymd_and_hms(2023, 10, 16, 1, 0, 0).unwrap();
        let samples = series(start, 5);
        let offset = utc_offset(3600 * 2);
        let daily = aggregate_daily(&samples, offset, usize::MAX);

        for entry in &daily {
            let chosen = noon_distance(entry.sample.timestamp.with_timezone(&offset).hour());
            let best = samples
                .iter()
                .filter(|s| s.timestamp.with_timezone(&offset).date_naive() == entry.date)
                .map(|s| noon_distance(s.timestamp.with_timezone(&offset).hour()))
                .min()
                .unwrap();
            assert_eq!(chosen, best);
        }

        let mut dates: Vec<_> = daily.iter().map(|d| d.date).collect();
        dates.dedup();
        assert_eq!(dates.len(), daily.len());
    }
}
