//! Nominatim-compatible geocoding client (forward search + reverse lookup)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::models::{Coordinate, PlaceResult};
use crate::Result;

pub use nominatim::{Address, ReverseResponse, SearchHit};

/// Zoom used when naming a resolved location (neighbourhood granularity)
pub const LOCALITY_ZOOM: u8 = 16;
/// Zoom used for the map panel's detail lookup (building granularity)
pub const DETAIL_ZOOM: u8 = 18;

/// Bounding box used to bias a forward search toward a location
///
/// Field order matches the provider's `viewbox` parameter:
/// `left,top,right,bottom` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    /// Build a box of the given half-width (degrees) around a center point
    #[must_use]
    pub fn around(center: Coordinate, half_width_deg: f64) -> Self {
        Self {
            left: center.longitude - half_width_deg,
            top: center.latitude + half_width_deg,
            right: center.longitude + half_width_deg,
            bottom: center.latitude - half_width_deg,
        }
    }

    /// Render as a `viewbox` query parameter value
    #[must_use]
    pub fn query_value(&self) -> String {
        format!("{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

/// Forward and reverse geocoding operations
///
/// The trait is the seam between the workflow and the HTTP provider; tests
/// inject scripted implementations.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Free-text search, optionally bounded to a viewbox
    async fn search(
        &self,
        query: &str,
        limit: u8,
        viewbox: Option<BoundingBox>,
    ) -> Result<Vec<SearchHit>>;

    /// Coordinate to structured address, with address details
    async fn reverse(&self, coordinate: Coordinate, zoom: u8) -> Result<ReverseResponse>;
}

/// HTTP client for a Nominatim-compatible service
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new client from configuration
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.geocoding.timeout_seconds)))
            .user_agent(config.geocoding.user_agent.clone())
            .build()
            .map_err(|e| ExplorerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.geocoding.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(
        &self,
        query: &str,
        limit: u8,
        viewbox: Option<BoundingBox>,
    ) -> Result<Vec<SearchHit>> {
        let mut url = format!(
            "{}/search?format=json&q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        if let Some(viewbox) = viewbox {
            url.push_str(&format!("&viewbox={}&bounded=1", viewbox.query_value()));
        }

        debug!("Forward geocoding: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept-Language", "en")
            .send()
            .await
            .map_err(|e| ExplorerError::geocode_search(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ExplorerError::geocode_search(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| ExplorerError::parse(format!("search response: {e}")))?;

        info!("Forward geocoding returned {} hits for '{}'", hits.len(), query);
        Ok(hits)
    }

    async fn reverse(&self, coordinate: Coordinate, zoom: u8) -> Result<ReverseResponse> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom={}&addressdetails=1",
            self.base_url, coordinate.latitude, coordinate.longitude, zoom
        );

        debug!("Reverse geocoding: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept-Language", "en")
            .send()
            .await
            .map_err(|e| ExplorerError::reverse_geocode(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ExplorerError::reverse_geocode(format!(
                "provider returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ExplorerError::parse(format!("reverse response: {e}")))
    }
}

impl From<SearchHit> for PlaceResult {
    fn from(hit: SearchHit) -> Self {
        let SearchHit {
            lat,
            lon,
            display_name,
            raw,
        } = hit;
        Self {
            lat,
            lon,
            display_name,
            raw: serde_json::Value::Object(raw),
        }
    }
}

/// Nominatim response structures
mod nominatim {
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};

    /// One forward-search result
    ///
    /// Coordinates arrive as strings; they stay that way until selection.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct SearchHit {
        pub lat: String,
        pub lon: String,
        pub display_name: String,
        /// Remaining provider attributes, kept verbatim
        #[serde(flatten)]
        pub raw: Map<String, Value>,
    }

    /// Reverse lookup response
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ReverseResponse {
        pub display_name: Option<String>,
        #[serde(rename = "type")]
        pub place_type: Option<String>,
        pub address: Option<Address>,
    }

    /// Structured address with every field optional
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Address {
        pub road: Option<String>,
        pub suburb: Option<String>,
        pub neighbourhood: Option<String>,
        pub city: Option<String>,
        pub town: Option<String>,
        pub village: Option<String>,
        pub county: Option<String>,
        pub state: Option<String>,
        pub postcode: Option<String>,
    }

    impl Address {
        /// Most local name available, for labelling a resolved location
        ///
        /// Preference order: suburb, neighbourhood, city, town, village,
        /// county.
        #[must_use]
        pub fn preferred_locality(&self) -> Option<&str> {
            self.suburb
                .as_deref()
                .or(self.neighbourhood.as_deref())
                .or(self.city.as_deref())
                .or(self.town.as_deref())
                .or(self.village.as_deref())
                .or(self.county.as_deref())
        }

        /// Settlement-level name (city, town or village)
        #[must_use]
        pub fn settlement(&self) -> Option<&str> {
            self.city
                .as_deref()
                .or(self.town.as_deref())
                .or(self.village.as_deref())
        }
    }

    impl ReverseResponse {
        /// Assemble a display address from the structured parts
        ///
        /// Returns `None` when no address breakdown is available so callers
        /// can fall back to whatever name they already hold.
        #[must_use]
        pub fn formatted_address(&self) -> Option<String> {
            let address = self.address.as_ref()?;
            let mut parts: Vec<&str> = Vec::new();
            if let Some(road) = address.road.as_deref() {
                parts.push(road);
            }
            if let Some(area) = address.suburb.as_deref().or(address.neighbourhood.as_deref()) {
                parts.push(area);
            }
            if let Some(settlement) = address.settlement() {
                parts.push(settlement);
            }
            if let Some(state) = address.state.as_deref() {
                parts.push(state);
            }
            if let Some(postcode) = address.postcode.as_deref() {
                parts.push(postcode);
            }
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }

        /// Human-readable place type ("tourist_attraction" -> "Tourist
        /// Attraction"), defaulting to "Location"
        #[must_use]
        pub fn place_type_label(&self) -> String {
            match self.place_type.as_deref() {
                Some(place_type) if !place_type.is_empty() => place_type
                    .split('_')
                    .map(capitalize)
                    .collect::<Vec<_>>()
                    .join(" "),
                _ => "Location".to_string(),
            }
        }
    }

    fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_around_center() {
        let center = Coordinate::new(21.17, 72.83).unwrap();
        let viewbox = BoundingBox::around(center, 0.15);
        assert!((viewbox.left - 72.68).abs() < 1e-9);
        assert!((viewbox.top - 21.32).abs() < 1e-9);
        assert!((viewbox.right - 72.98).abs() < 1e-9);
        assert!((viewbox.bottom - 21.02).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_query_value_order() {
        let viewbox = BoundingBox {
            left: 72.68,
            top: 21.32,
            right: 72.98,
            bottom: 21.02,
        };
        assert_eq!(viewbox.query_value(), "72.68,21.32,72.98,21.02");
    }

    #[test]
    fn test_preferred_locality_order() {
        let mut address = Address {
            city: Some("Surat".to_string()),
            county: Some("Surat District".to_string()),
            ..Address::default()
        };
        assert_eq!(address.preferred_locality(), Some("Surat"));

        address.suburb = Some("Adajan".to_string());
        assert_eq!(address.preferred_locality(), Some("Adajan"));

        let county_only = Address {
            county: Some("Surat District".to_string()),
            ..Address::default()
        };
        assert_eq!(county_only.preferred_locality(), Some("Surat District"));

        assert_eq!(Address::default().preferred_locality(), None);
    }

    #[test]
    fn test_formatted_address_assembly() {
        let response = ReverseResponse {
            display_name: Some("Cafe X, Street 1, Adajan, Surat, Gujarat, 395009".to_string()),
            place_type: Some("cafe".to_string()),
            address: Some(Address {
                road: Some("Street 1".to_string()),
                suburb: Some("Adajan".to_string()),
                city: Some("Surat".to_string()),
                state: Some("Gujarat".to_string()),
                postcode: Some("395009".to_string()),
                ..Address::default()
            }),
        };
        assert_eq!(
            response.formatted_address().unwrap(),
            "Street 1, Adajan, Surat, Gujarat, 395009"
        );
    }

    #[test]
    fn test_formatted_address_missing_breakdown() {
        let response = ReverseResponse::default();
        assert!(response.formatted_address().is_none());
    }

    #[test]
    fn test_place_type_label() {
        let response = ReverseResponse {
            place_type: Some("tourist_attraction".to_string()),
            ..ReverseResponse::default()
        };
        assert_eq!(response.place_type_label(), "Tourist Attraction");

        let untyped = ReverseResponse::default();
        assert_eq!(untyped.place_type_label(), "Location");
    }

    #[test]
    fn test_search_hit_deserializes_string_coordinates() {
        let json = r#"{
            "lat": "21.1871",
            "lon": "72.8092",
            "display_name": "Cafe X, Street 1, City, State",
            "osm_type": "node",
            "importance": 0.42
        }"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.lat, "21.1871");
        assert_eq!(hit.display_name, "Cafe X, Street 1, City, State");
        assert!(hit.raw.contains_key("osm_type"));

        let place: PlaceResult = hit.into();
        assert_eq!(place.short_name(), "Cafe X");
        assert_eq!(place.raw["importance"], 0.42);
    }
}
