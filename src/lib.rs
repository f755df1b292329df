//! Place Explorer - location resolution and place search workflow
//!
//! This library provides the core workflow behind a split-view place
//! discovery UI: tiered location resolution, location-biased place search
//! with a widening fallback, and the selection bridge that hands a chosen
//! place to the map panel for detail enrichment.

pub mod config;
pub mod error;
pub mod explorer;
pub mod geocoding;
pub mod map_runtime;
pub mod models;
pub mod network_locate;
pub mod resolver;
pub mod search;
pub mod selection;
pub mod sensor;

// Re-export core types for public API
pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use explorer::Explorer;
pub use geocoding::{BoundingBox, Geocoder, NominatimClient, ReverseResponse, SearchHit};
pub use map_runtime::MapRuntime;
pub use models::{
    Conversation, ConversationEntry, Coordinate, PlaceResult, ResolutionMethod, ResolvedLocation,
    SearchQuery, SelectedPlace,
};
pub use network_locate::{IpLookupClient, NetworkLocation, NetworkLocator};
pub use resolver::LocationResolver;
pub use search::{PlaceSearchClient, QuickAction, QUICK_ACTIONS};
pub use selection::{DetailPanel, DetailState, PlaceDetails, SelectionBridge};
pub use sensor::{FixOptions, NoSensor, PositionFix, PositionSensor, SensorError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ExplorerError>;
