//! Tiered location resolution
//!
//! Produces a best-effort [`ResolvedLocation`] that never fails outright:
//! device sensor first, then network-address lookup, then the bundled static
//! default. Each tier records its method tag so the UI can disclose
//! confidence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::ExplorerConfig;
use crate::geocoding::{Geocoder, LOCALITY_ZOOM};
use crate::models::{Coordinate, ResolutionMethod, ResolvedLocation};
use crate::network_locate::NetworkLocator;
use crate::sensor::{FixOptions, PositionSensor};
use crate::Result;

/// Placeholder name when reverse naming yields nothing
const GENERIC_PLACE_NAME: &str = "Your Location";

/// Service resolving the user's current location with ordered fallbacks
pub struct LocationResolver {
    sensor: Arc<dyn PositionSensor>,
    geocoder: Arc<dyn Geocoder>,
    network: Arc<dyn NetworkLocator>,
    fix_options: FixOptions,
    fallback: ResolvedLocation,
    in_flight: AtomicBool,
}

impl LocationResolver {
    /// Create a resolver from configuration and provider seams
    pub fn new(
        config: &ExplorerConfig,
        sensor: Arc<dyn PositionSensor>,
        geocoder: Arc<dyn Geocoder>,
        network: Arc<dyn NetworkLocator>,
    ) -> Result<Self> {
        let coordinate = Coordinate::new(
            config.default_location.latitude,
            config.default_location.longitude,
        )?;
        let fallback = ResolvedLocation::new(
            coordinate,
            config.default_location.name.clone(),
            None,
            ResolutionMethod::StaticDefault,
        );
        let fix_options = FixOptions {
            timeout: Duration::from_secs(u64::from(config.search.sensor_timeout_seconds)),
            ..FixOptions::default()
        };

        Ok(Self {
            sensor,
            geocoder,
            network,
            fix_options,
            fallback,
            in_flight: AtomicBool::new(false),
        })
    }

    /// Whether a resolution pass is currently running
    ///
    /// Exposed so the UI can disable the refresh trigger while in flight.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The bundled static-default location (tier 3)
    #[must_use]
    pub fn fallback_location(&self) -> &ResolvedLocation {
        &self.fallback
    }

    /// Run the full three-tier resolution sequence from the top
    ///
    /// Returns `None` when a prior resolution is still in flight: a manual
    /// refresh during resolution is a no-op, it neither queues nor restarts.
    pub async fn resolve(&self) -> Option<ResolvedLocation> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Resolution already in flight, ignoring refresh");
            return None;
        }

        let resolved = self.resolve_tiers().await;
        self.in_flight.store(false, Ordering::SeqCst);

        info!(
            "Resolved location: {} at ({}, {}) via {:?}",
            resolved.name, resolved.coordinate.latitude, resolved.coordinate.longitude,
            resolved.method
        );
        Some(resolved)
    }

    async fn resolve_tiers(&self) -> ResolvedLocation {
        match self.try_device_sensor().await {
            Ok(location) => return location,
            Err(e) => debug!("Device sensor tier failed: {}", e),
        }

        match self.try_network_lookup().await {
            Ok(location) => return location,
            Err(e) => warn!("Network lookup tier failed: {}", e),
        }

        debug!("Falling back to bundled default location");
        self.fallback.clone()
    }

    /// Tier 1: one-shot high-accuracy device fix, named via reverse lookup
    async fn try_device_sensor(&self) -> Result<ResolvedLocation> {
        let fix = self.sensor.current_position(&self.fix_options).await?;
        let coordinate = Coordinate::new(fix.latitude, fix.longitude)?;

        // Naming failure does not fail the tier; the raw fix is still a
        // usable result.
        let name = match self.geocoder.reverse(coordinate, LOCALITY_ZOOM).await {
            Ok(response) => response
                .address
                .as_ref()
                .and_then(|address| address.preferred_locality())
                .unwrap_or(GENERIC_PLACE_NAME)
                .to_string(),
            Err(e) => {
                debug!("Reverse naming failed: {}, using placeholder", e);
                GENERIC_PLACE_NAME.to_string()
            }
        };

        Ok(ResolvedLocation::new(
            coordinate,
            name,
            Some(fix.accuracy_m),
            ResolutionMethod::DeviceSensor,
        ))
    }

    /// Tier 2: coarse network-address lookup, primary then secondary
    async fn try_network_lookup(&self) -> Result<ResolvedLocation> {
        let location = self.network.locate().await?;
        let coordinate = Coordinate::new(location.latitude, location.longitude)?;
        Ok(ResolvedLocation::new(
            coordinate,
            location.name,
            None,
            ResolutionMethod::NetworkInferred,
        ))
    }
}
