//! Device geolocation sensor seam
//!
//! The host environment (a browser, a mobile shell, a test harness) owns the
//! actual positioning hardware. This module models the one-shot "current
//! position" request as an async operation with a caller-specified timeout
//! and named failure kinds, so the resolver can treat the callback-driven
//! host API as a plain future.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for a single position fix request
#[derive(Debug, Clone, PartialEq)]
pub struct FixOptions {
    /// Prefer the most accurate fix the hardware can provide
    pub high_accuracy: bool,
    /// Bounded wait before the request fails with [`SensorError::Timeout`]
    pub timeout: Duration,
    /// Maximum acceptable age of a cached fix; zero means no cached result
    pub max_age: Duration,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            max_age: Duration::ZERO,
        }
    }
}

/// A single position fix from the device sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Estimated accuracy radius in meters
    pub accuracy_m: f64,
}

/// Failure kinds a position request can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position request timed out")]
    Timeout,

    #[error("position unavailable")]
    Unavailable,

    #[error("geolocation not supported")]
    Unsupported,
}

/// One-shot position source
#[async_trait]
pub trait PositionSensor: Send + Sync {
    /// Request a single fresh position fix
    async fn current_position(&self, options: &FixOptions) -> Result<PositionFix, SensorError>;
}

/// Sensor stub for environments without positioning hardware
pub struct NoSensor;

#[async_trait]
impl PositionSensor for NoSensor {
    async fn current_position(&self, _options: &FixOptions) -> Result<PositionFix, SensorError> {
        Err(SensorError::Unsupported)
    }
}
