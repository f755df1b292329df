//! Network-address based location lookup
//!
//! Coarse location inferred from the requester's network address. Two
//! providers with different response shapes are tried in order; the secondary
//! is only consulted when the primary fails or returns no coordinates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::Result;

/// Result of a network-address lookup; no accuracy radius is available
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// Network-address location source
#[async_trait]
pub trait NetworkLocator: Send + Sync {
    async fn locate(&self) -> Result<NetworkLocation>;
}

/// HTTP client querying the primary and secondary lookup providers
pub struct IpLookupClient {
    client: Client,
    primary_url: String,
    secondary_url: String,
}

impl IpLookupClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(
                config.network_location.timeout_seconds,
            )))
            .build()
            .map_err(|e| ExplorerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            primary_url: config.network_location.primary_url.clone(),
            secondary_url: config.network_location.secondary_url.clone(),
        })
    }
}

#[async_trait]
impl NetworkLocator for IpLookupClient {
    async fn locate(&self) -> Result<NetworkLocation> {
        locate_via(self).await
    }
}

/// Raw provider fetches, separated from the ordering logic so that the
/// primary-then-secondary sequence is exercisable without a live endpoint
#[async_trait]
trait LookupTransport: Send + Sync {
    async fn fetch_primary(&self) -> Result<providers::PrimaryResponse>;
    async fn fetch_secondary(&self) -> Result<providers::SecondaryResponse>;
}

#[async_trait]
impl LookupTransport for IpLookupClient {
    async fn fetch_primary(&self) -> Result<providers::PrimaryResponse> {
        self.client
            .get(&self.primary_url)
            .send()
            .await
            .map_err(|e| ExplorerError::network_lookup(format!("primary request failed: {e}")))?
            .json()
            .await
            .map_err(|e| ExplorerError::parse(format!("primary response: {e}")))
    }

    async fn fetch_secondary(&self) -> Result<providers::SecondaryResponse> {
        self.client
            .get(&self.secondary_url)
            .send()
            .await
            .map_err(|e| ExplorerError::network_lookup(format!("secondary request failed: {e}")))?
            .json()
            .await
            .map_err(|e| ExplorerError::parse(format!("secondary response: {e}")))
    }
}

/// Try the primary provider, falling back to the secondary only when the
/// primary fails or delivers no coordinates. Both failing collapses into a
/// single lookup error carrying both causes.
async fn locate_via(transport: &dyn LookupTransport) -> Result<NetworkLocation> {
    let primary = transport
        .fetch_primary()
        .await
        .and_then(providers::PrimaryResponse::into_location);

    match primary {
        Ok(location) => {
            debug!(
                "Primary network lookup succeeded: {} ({}, {})",
                location.name, location.latitude, location.longitude
            );
            Ok(location)
        }
        Err(e) => {
            warn!("Primary network lookup failed: {}, trying secondary", e);
            let location = transport
                .fetch_secondary()
                .await
                .and_then(providers::SecondaryResponse::into_location)
                .map_err(|e2| {
                    ExplorerError::network_lookup(format!(
                        "both providers failed (primary: {e}; secondary: {e2})"
                    ))
                })?;
            debug!(
                "Secondary network lookup succeeded: {} ({}, {})",
                location.name, location.latitude, location.longitude
            );
            Ok(location)
        }
    }
}

/// Lookup provider response shapes
mod providers {
    use serde::Deserialize;

    use super::NetworkLocation;
    use crate::error::ExplorerError;
    use crate::Result;

    /// ipapi.co shape
    #[derive(Debug, Deserialize)]
    pub struct PrimaryResponse {
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub city: Option<String>,
        pub region: Option<String>,
    }

    impl PrimaryResponse {
        /// Coordinates are mandatory; the name degrades city, region, generic
        pub fn into_location(self) -> Result<NetworkLocation> {
            match (self.latitude, self.longitude) {
                (Some(latitude), Some(longitude)) => Ok(NetworkLocation {
                    latitude,
                    longitude,
                    name: self
                        .city
                        .or(self.region)
                        .unwrap_or_else(|| "Your Area".to_string()),
                }),
                _ => Err(ExplorerError::network_lookup(
                    "primary provider returned no coordinates",
                )),
            }
        }
    }

    /// ip-api.com shape
    #[derive(Debug, Deserialize)]
    pub struct SecondaryResponse {
        pub lat: Option<f64>,
        pub lon: Option<f64>,
        pub city: Option<String>,
        #[serde(rename = "regionName")]
        pub region_name: Option<String>,
    }

    impl SecondaryResponse {
        pub fn into_location(self) -> Result<NetworkLocation> {
            match (self.lat, self.lon) {
                (Some(latitude), Some(longitude)) => Ok(NetworkLocation {
                    latitude,
                    longitude,
                    name: self
                        .city
                        .or(self.region_name)
                        .unwrap_or_else(|| "Your Area".to_string()),
                }),
                _ => Err(ExplorerError::network_lookup(
                    "secondary provider returned no coordinates",
                )),
            }
        }
    }
}
