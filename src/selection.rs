//! Selection bridge and map-panel detail enrichment
//!
//! Selecting a place is a one-way push from the search panel to the map
//! panel; the map panel owns its own detail-fetch lifecycle. Each detail
//! fetch is tagged with a monotonically increasing sequence number and a
//! response is discarded unless its sequence is the latest issued, so a
//! late-arriving stale response can never overwrite a newer selection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::geocoding::{Geocoder, ReverseResponse, DETAIL_ZOOM};
use crate::models::{Coordinate, PlaceResult, SelectedPlace};
use crate::Result;

/// Callback invoked once per selection with the outbound notification
pub type SelectionCallback = Box<dyn Fn(SelectedPlace) + Send + Sync>;

/// One-way notification channel from the search panel to its container
pub struct SelectionBridge {
    on_select: SelectionCallback,
}

impl SelectionBridge {
    pub fn new(on_select: SelectionCallback) -> Self {
        Self { on_select }
    }

    /// Turn a chosen result into exactly one outbound notification
    ///
    /// Coordinates are parsed from the provider's string fields; the name is
    /// the first comma-delimited segment of the display name.
    pub fn select(&self, place: &PlaceResult) -> Result<SelectedPlace> {
        let coordinate = place.coordinate()?;
        let selected = SelectedPlace {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            name: place.short_name().to_string(),
        };
        (self.on_select)(selected.clone());
        Ok(selected)
    }

    /// Notify for a location that did not come from a search result
    pub fn select_location(&self, latitude: f64, longitude: f64, name: &str) -> SelectedPlace {
        let selected = SelectedPlace {
            latitude,
            longitude,
            name: name.to_string(),
        };
        (self.on_select)(selected.clone());
        selected
    }
}

/// Reverse-geocoded detail for the info card
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    /// Structured address joined for display, when a breakdown exists
    pub formatted_address: Option<String>,
    /// Human-readable place type, defaulting to "Location"
    pub place_type: String,
}

impl From<&ReverseResponse> for PlaceDetails {
    fn from(response: &ReverseResponse) -> Self {
        Self {
            formatted_address: response.formatted_address(),
            place_type: response.place_type_label(),
        }
    }
}

/// Detail-fetch lifecycle for a single selection
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    /// Fetch in flight for the contained selection
    Loading { place: SelectedPlace },
    /// Details arrived for the contained selection
    Ready {
        place: SelectedPlace,
        details: PlaceDetails,
    },
    /// Fetch failed; the card stays visible with last-known name/coordinate
    Failed { place: SelectedPlace },
}

/// Map-panel side of the bridge: owns the detail-fetch state machine
pub struct DetailPanel {
    geocoder: Arc<dyn Geocoder>,
    state: Mutex<DetailState>,
    latest_seq: AtomicU64,
}

impl DetailPanel {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            state: Mutex::new(DetailState::Idle),
            latest_seq: AtomicU64::new(0),
        }
    }

    /// Current state of the info card
    #[must_use]
    pub fn state(&self) -> DetailState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    /// Start a new selection: forces `Loading` regardless of current state
    /// and supersedes any in-flight fetch. Returns the sequence number the
    /// eventual response must present.
    pub fn begin_selection(&self, place: SelectedPlace) -> u64 {
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut state) = self.state.lock() {
            *state = DetailState::Loading { place };
        }
        debug!("Detail fetch {} started", seq);
        seq
    }

    /// Apply a fetch outcome; stale sequence numbers are discarded
    pub fn apply_result(&self, seq: u64, place: SelectedPlace, result: Result<ReverseResponse>) {
        if seq != self.latest_seq.load(Ordering::SeqCst) {
            debug!("Discarding stale detail response {}", seq);
            return;
        }
        let next = match result {
            Ok(response) => DetailState::Ready {
                place,
                details: PlaceDetails::from(&response),
            },
            Err(e) => {
                warn!("Detail fetch {} failed: {}", seq, e);
                DetailState::Failed { place }
            }
        };
        if let Ok(mut state) = self.state.lock() {
            // A newer begin_selection may have raced in between the sequence
            // check and this lock; re-check under the lock.
            if seq == self.latest_seq.load(Ordering::SeqCst) {
                *state = next;
            }
        }
    }

    /// Run the fetch half of a selection started with `begin_selection`
    pub async fn resolve_details(&self, seq: u64, place: SelectedPlace) {
        let result = match Coordinate::new(place.latitude, place.longitude) {
            Ok(coordinate) => self.geocoder.reverse(coordinate, DETAIL_ZOOM).await,
            Err(e) => Err(e),
        };
        self.apply_result(seq, place, result);
    }

    /// Run a full detail fetch for a selection
    pub async fn fetch_details(&self, place: SelectedPlace) {
        let seq = self.begin_selection(place.clone());
        self.resolve_details(seq, place).await;
    }

    /// Clear the card back to idle (explicit user dismissal)
    pub fn clear(&self) {
        if let Ok(mut state) = self.state.lock() {
            *state = DetailState::Idle;
        }
    }
}
