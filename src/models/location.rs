//! Coordinate and resolved-location models

use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees, in [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, in [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a validated coordinate
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ExplorerError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ExplorerError::validation(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ExplorerError::validation(format!(
                "longitude {longitude} out of range [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as a "lat, lon" string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// How a location was obtained, so the UI can disclose confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMethod {
    /// Exact fix from the device positioning hardware
    DeviceSensor,
    /// Coarse location inferred from the network address
    NetworkInferred,
    /// Hard-coded fallback bundled with the application
    StaticDefault,
}

/// A resolved user location
///
/// Created once per resolution attempt and never mutated; a later resolution
/// supersedes it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    /// Human-readable name (neighbourhood, city, ...)
    pub name: String,
    /// Accuracy radius in meters, only known for device-sensor fixes
    pub accuracy_m: Option<f64>,
    pub method: ResolutionMethod,
}

impl ResolvedLocation {
    #[must_use]
    pub fn new(
        coordinate: Coordinate,
        name: String,
        accuracy_m: Option<f64>,
        method: ResolutionMethod,
    ) -> Self {
        Self {
            coordinate,
            name,
            accuracy_m,
            method,
        }
    }

    /// Short confidence line for the location bar
    #[must_use]
    pub fn confidence_label(&self) -> String {
        match self.method {
            ResolutionMethod::DeviceSensor => match self.accuracy_m {
                Some(accuracy) => format!("GPS \u{2022} {}m", accuracy.round() as i64),
                None => "GPS".to_string(),
            },
            ResolutionMethod::NetworkInferred => "IP-based location".to_string(),
            ResolutionMethod::StaticDefault => "Default location".to_string(),
        }
    }
}
