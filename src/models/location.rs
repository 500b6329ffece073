//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location as resolved by the upstream
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country: None,
            latitude,
            longitude,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(name: String, country: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country: Some(country),
            latitude,
            longitude,
        }
    }

    /// "Name, CC" or just the name when no country is known
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("Lat: {:.2}° | Lon: {:.2}°", self.latitude, self.longitude)
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationQuery {
    /// Free-text city query, already trimmed
    Name(String),
    /// Latitude and longitude in decimal degrees
    Coordinates(f64, f64),
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Name(name) => write!(f, "{name}"),
            LocationQuery::Coordinates(lat, lon) => write!(f, "{lat:.4}, {lon:.4}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let location = Location::with_country("Madrid".to_string(), "ES".to_string(), 40.4168, -3.7038);
        assert_eq!(location.display_name(), "Madrid, ES");

        let location = Location::new("Atlantis".to_string(), 0.0, 0.0);
        assert_eq!(location.display_name(), "Atlantis");
    }

    #[test]
    fn test_format_coordinates() {
        let location = Location::new("San José".to_string(), 9.9333, -84.0833);
        assert_eq!(location.format_coordinates(), "Lat: 9.93° | Lon: -84.08°");
    }

    #[test]
    fn test_query_display() {
        assert_eq!(LocationQuery::Name("Lima".into()).to_string(), "Lima");
        assert_eq!(
            LocationQuery::Coordinates(46.818_234, 8.227_456).to_string(),
            "46.8182, 8.2275"
        );
    }
}
