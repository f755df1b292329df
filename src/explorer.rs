//! Container wiring the search panel workflow to the map panel
//!
//! A single parameterized workflow owns the resolver, the search client,
//! the transcript, and the selection bridge, and leaves rendering to the
//! host.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::config::ExplorerConfig;
use crate::geocoding::{Geocoder, NominatimClient};
use crate::models::{
    Conversation, ConversationEntry, PlaceResult, ResolvedLocation, SearchQuery, SelectedPlace,
};
use crate::network_locate::{IpLookupClient, NetworkLocator};
use crate::resolver::LocationResolver;
use crate::search::{quick_action_query, PlaceSearchClient};
use crate::selection::{DetailPanel, DetailState, SelectionBridge, SelectionCallback};
use crate::sensor::PositionSensor;
use crate::Result;

/// The split-view workflow: search panel state plus the map panel's detail
/// lifecycle, sharing state through the selection callback.
pub struct Explorer {
    resolver: Arc<LocationResolver>,
    search: PlaceSearchClient,
    bridge: SelectionBridge,
    detail: Arc<DetailPanel>,
    conversation: Mutex<Conversation>,
    current_location: Mutex<Option<ResolvedLocation>>,
    display_cap: usize,
}

impl Explorer {
    /// Wire the workflow with explicit provider seams
    pub fn new(
        config: &ExplorerConfig,
        sensor: Arc<dyn PositionSensor>,
        geocoder: Arc<dyn Geocoder>,
        network: Arc<dyn NetworkLocator>,
        on_select: SelectionCallback,
    ) -> Result<Self> {
        let resolver = Arc::new(LocationResolver::new(
            config,
            sensor,
            Arc::clone(&geocoder),
            network,
        )?);
        Ok(Self {
            resolver,
            search: PlaceSearchClient::new(config, Arc::clone(&geocoder)),
            bridge: SelectionBridge::new(on_select),
            detail: Arc::new(DetailPanel::new(geocoder)),
            conversation: Mutex::new(Conversation::new()),
            current_location: Mutex::new(None),
            display_cap: config.search.display_cap,
        })
    }

    /// Wire the workflow against the real HTTP providers
    pub fn with_http_providers(
        config: &ExplorerConfig,
        sensor: Arc<dyn PositionSensor>,
        on_select: SelectionCallback,
    ) -> Result<Self> {
        let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimClient::new(config)?);
        let network: Arc<dyn NetworkLocator> = Arc::new(IpLookupClient::new(config)?);
        Self::new(config, sensor, geocoder, network, on_select)
    }

    /// Run (or re-run) the full location resolution sequence
    ///
    /// A refresh while a prior one is in flight is ignored and returns
    /// `None`; otherwise the new location supersedes the previous one.
    pub async fn refresh_location(&self) -> Option<ResolvedLocation> {
        let resolved = self.resolver.resolve().await?;
        *self
            .current_location
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(resolved.clone());
        Some(resolved)
    }

    /// Whether a resolution pass is running (disables the refresh trigger)
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.resolver.is_resolving()
    }

    /// The most recently resolved location, if any
    #[must_use]
    pub fn current_location(&self) -> Option<ResolvedLocation> {
        self.current_location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Status line for the location bar
    #[must_use]
    pub fn location_status(&self) -> String {
        if self.resolver.is_resolving() {
            return "Detecting...".to_string();
        }
        match self.current_location() {
            Some(location) => format!("{} ({})", location.name, location.confidence_label()),
            None => "Detecting...".to_string(),
        }
    }

    /// Submit a free-text query: appends the user entry, searches biased to
    /// the current (or default) location, and appends the assistant entry.
    /// Returns the results shown in the response (capped for display).
    pub async fn send_message(&self, text: &str) -> Vec<PlaceResult> {
        let query = text.trim();
        if query.is_empty() {
            return Vec::new();
        }

        {
            let mut conversation = self
                .conversation
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            conversation.push_user(query.to_string());
        }

        let current = self.current_location();
        let bias = current
            .clone()
            .unwrap_or_else(|| self.resolver.fallback_location().clone());
        debug!("Searching '{}' biased to {}", query, bias.name);

        let results = self.search.search(&SearchQuery::new(query, bias)).await;
        let near = current.map_or_else(|| "you".to_string(), |location| location.name);

        let (text, shown) = if results.is_empty() {
            (
                format!("No results found for \"{query}\". Try a different search."),
                Vec::new(),
            )
        } else {
            let shown: Vec<PlaceResult> =
                results.iter().take(self.display_cap).cloned().collect();
            (
                format!("Found {} places near {}", results.len(), near),
                shown,
            )
        };

        let mut conversation = self
            .conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        conversation.push_assistant(text, shown.clone());
        shown
    }

    /// Run a quick action; equivalent to typing its canned query
    pub async fn quick_action(&self, label: &str) -> Option<Vec<PlaceResult>> {
        let query = quick_action_query(label)?;
        Some(self.send_message(query).await)
    }

    /// Select a result: one outbound notification, then the map panel's
    /// detail fetch for its info card.
    ///
    /// The card flips to `Loading` before this returns; the fetch itself
    /// runs on its own task, so a newer selection supersedes it rather
    /// than waiting behind it.
    pub fn select_place(&self, place: &PlaceResult) -> Result<SelectedPlace> {
        let selected = self.bridge.select(place)?;
        let seq = self.detail.begin_selection(selected.clone());
        let detail = Arc::clone(&self.detail);
        let place = selected.clone();
        tokio::spawn(async move {
            detail.resolve_details(seq, place).await;
        });
        Ok(selected)
    }

    /// Dismiss the info card
    pub fn clear_selection(&self) {
        self.detail.clear();
    }

    /// Current detail-card state
    #[must_use]
    pub fn detail_state(&self) -> DetailState {
        self.detail.state()
    }

    /// Map panel's detail state machine, for hosts driving their own fetches
    #[must_use]
    pub fn detail_panel(&self) -> Arc<DetailPanel> {
        Arc::clone(&self.detail)
    }

    /// Snapshot of the transcript
    #[must_use]
    pub fn transcript(&self) -> Vec<ConversationEntry> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries()
            .to_vec()
    }
}
