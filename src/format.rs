//! Formatting helpers shared by the renderer

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::models::MeasurementSystem;

/// Default base for upstream condition icons
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Fixed offset for a UTC offset given in seconds, falling back to UTC when
/// the value is out of range
#[must_use]
pub fn utc_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

/// Local time of day as `HH:MM`
#[must_use]
pub fn format_time(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%H:%M").to_string()
}

/// Local date as `Mon, Oct 16`
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%a, %b %-d").to_string()
}

/// Round half up, so -2.5 becomes -2 and 2.5 becomes 3
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Rounded temperature with the unit suffix, e.g. `22°C`
#[must_use]
pub fn format_temperature(value: f64, units: MeasurementSystem) -> String {
    format!("{}{}", round_half_up(value), units.temperature_suffix())
}

/// Rounded temperature with a bare degree sign, e.g. `22°`
#[must_use]
pub fn format_degrees(value: f64) -> String {
    format!("{}°", round_half_up(value))
}

#[must_use]
pub fn icon_url(base_url: &str, icon: &str) -> String {
    format!("{}/{icon}@4x.png", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    #[rstest]
    #[case(21.6, 22)]
    #[case(21.4, 21)]
    #[case(2.5, 3)]
    #[case(-2.5, -2)]
    #[case(-2.6, -3)]
    #[case(0.0, 0)]
    fn test_round_half_up(#[case] input: f64, #[case] expected: i64) {
        assert_eq!(round_half_up(input), expected);
    }

    #[test]
    fn test_format_time_uses_offset() {
        // 2023-10-16 05:32 UTC
        let ts = at(1_697_434_320);
        assert_eq!(format_time(ts, utc_offset(0)), "05:32");
        assert_eq!(format_time(ts, utc_offset(7200)), "07:32");
        assert_eq!(format_time(ts, utc_offset(-6 * 3600)), "23:32");
    }

    #[test]
    fn test_format_date() {
        // 2023-10-16 12:00 UTC, a Monday
        let ts = at(1_697_457_600);
        assert_eq!(format_date(ts, utc_offset(0)), "Mon, Oct 16");
        assert_eq!(format_date(ts, utc_offset(13 * 3600)), "Tue, Oct 17");
    }

    #[test]
    fn test_utc_offset_out_of_range_falls_back_to_utc() {
        assert_eq!(utc_offset(90_000).local_minus_utc(), 0);
        assert_eq!(utc_offset(-18_000).local_minus_utc(), -18_000);
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(21.6, MeasurementSystem::Metric), "22°C");
        assert_eq!(format_temperature(70.9, MeasurementSystem::Imperial), "71°F");
        assert_eq!(format_degrees(-0.4), "0°");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url(DEFAULT_ICON_BASE_URL, "01d"),
            "https://openweathermap.org/img/wn/01d@4x.png"
        );
        assert_eq!(icon_url("http://icons.local/", "10n"), "http://icons.local/10n@4x.png");
    }
}
