//! Search result and selection models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExplorerError;
use crate::models::{Coordinate, ResolvedLocation};

/// A free-text query plus the location used as spatial bias at query time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub bias: ResolvedLocation,
}

impl SearchQuery {
    #[must_use]
    pub fn new<S: Into<String>>(text: S, bias: ResolvedLocation) -> Self {
        Self {
            text: text.into(),
            bias,
        }
    }
}

/// A single place returned by the forward geocoding provider
///
/// Latitude and longitude are kept as the provider's string fields and only
/// parsed when the place is actually selected. Held in the conversation until
/// a new search replaces it; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Latitude as returned by the provider (string-typed)
    pub lat: String,
    /// Longitude as returned by the provider (string-typed)
    pub lon: String,
    /// Full comma-delimited hierarchical address
    pub display_name: String,
    /// Raw provider payload for consumers that need extra attributes
    pub raw: Value,
}

impl PlaceResult {
    /// Parse the provider's string fields into a validated coordinate
    pub fn coordinate(&self) -> Result<Coordinate, ExplorerError> {
        let latitude: f64 = self
            .lat
            .parse()
            .map_err(|_| ExplorerError::parse(format!("invalid latitude '{}'", self.lat)))?;
        let longitude: f64 = self
            .lon
            .parse()
            .map_err(|_| ExplorerError::parse(format!("invalid longitude '{}'", self.lon)))?;
        Coordinate::new(latitude, longitude)
    }

    /// First comma-delimited segment of the display name
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .unwrap_or(&self.display_name)
    }

    /// Second and third display-name segments, for result-list subtitles
    #[must_use]
    pub fn vicinity(&self) -> String {
        self.display_name
            .split(',')
            .skip(1)
            .take(2)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The place the user has actively chosen
///
/// At most one exists at a time; a new selection replaces it wholesale and
/// the user clears it explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlace {
    pub latitude: f64,
    pub longitude: f64,
    /// Short name shown on the info card
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> PlaceResult {
        PlaceResult {
            lat: "21.1871".to_string(),
            lon: "72.8092".to_string(),
            display_name: "Cafe X, Street 1, City, State".to_string(),
            raw: Value::Null,
        }
    }

    #[test]
    fn test_coordinate_parsing() {
        let coordinate = cafe().coordinate().unwrap();
        assert_eq!(coordinate.latitude, 21.1871);
        assert_eq!(coordinate.longitude, 72.8092);
    }

    #[test]
    fn test_coordinate_parsing_rejects_garbage() {
        let mut place = cafe();
        place.lat = "not-a-number".to_string();
        assert!(place.coordinate().is_err());
    }

    #[test]
    fn test_coordinate_parsing_rejects_out_of_range() {
        let mut place = cafe();
        place.lat = "123.4".to_string();
        assert!(place.coordinate().is_err());
    }

    #[test]
    fn test_short_name_is_first_segment() {
        assert_eq!(cafe().short_name(), "Cafe X");
    }

    #[test]
    fn test_vicinity_joins_middle_segments() {
        assert_eq!(cafe().vicinity(), " Street 1, City");
    }

    #[test]
    fn test_short_name_without_commas() {
        let mut place = cafe();
        place.display_name = "Standalone".to_string();
        assert_eq!(place.short_name(), "Standalone");
        assert_eq!(place.vicinity(), "");
    }
}
