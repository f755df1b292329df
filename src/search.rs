//! Place search biased to a location, with a widening fallback
//!
//! Failures never surface to the caller; they degrade to empty results. The
//! provider's ordering is kept as-is and truncation to a display cap happens
//! at the consumption boundary, not here.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ExplorerConfig;
use crate::geocoding::{BoundingBox, Geocoder};
use crate::models::{PlaceResult, SearchQuery};

/// A quick-action chip: fixed label mapped to a canned query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub query: &'static str,
}

/// Category quick actions; selecting one is equivalent to typing its query
pub const QUICK_ACTIONS: [QuickAction; 8] = [
    QuickAction { label: "Cafes", query: "cafe" },
    QuickAction { label: "Food", query: "restaurant" },
    QuickAction { label: "Hotels", query: "hotel" },
    QuickAction { label: "Attractions", query: "tourist attraction" },
    QuickAction { label: "Hospital", query: "hospital" },
    QuickAction { label: "Fuel", query: "petrol pump" },
    QuickAction { label: "Mall", query: "shopping mall" },
    QuickAction { label: "Parks", query: "park garden" },
];

/// Look up the canned query for a quick-action label
#[must_use]
pub fn quick_action_query(label: &str) -> Option<&'static str> {
    QUICK_ACTIONS
        .iter()
        .find(|action| action.label == label)
        .map(|action| action.query)
}

/// Client issuing biased searches with an unbounded widening fallback
pub struct PlaceSearchClient {
    geocoder: Arc<dyn Geocoder>,
    bias_half_width_deg: f64,
    biased_limit: u8,
    fallback_limit: u8,
    fallback_region: String,
}

impl PlaceSearchClient {
    pub fn new(config: &ExplorerConfig, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            bias_half_width_deg: config.search.bias_half_width_deg,
            biased_limit: config.search.biased_limit,
            fallback_limit: config.search.fallback_limit,
            fallback_region: config.search.fallback_region.clone(),
        }
    }

    /// Search for places near the bias location
    ///
    /// First pass is bounded to a viewbox around the bias; a zero-result
    /// (or failed) first pass triggers exactly one unbounded search whose
    /// query is widened with the bias location's name. Returns an empty list
    /// when both passes are empty or erroring.
    pub async fn search(&self, query: &SearchQuery) -> Vec<PlaceResult> {
        let viewbox = BoundingBox::around(query.bias.coordinate, self.bias_half_width_deg);

        let biased = match self
            .geocoder
            .search(&query.text, self.biased_limit, Some(viewbox))
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Biased search failed: {}, widening", e);
                Vec::new()
            }
        };

        if !biased.is_empty() {
            debug!("Biased search returned {} results", biased.len());
            return biased.into_iter().map(PlaceResult::from).collect();
        }

        let region = if query.bias.name.is_empty() {
            self.fallback_region.as_str()
        } else {
            query.bias.name.as_str()
        };
        let wider_query = format!("{} near {}", query.text, region);
        info!("No biased results for '{}', reissuing as '{}'", query.text, wider_query);

        match self
            .geocoder
            .search(&wider_query, self.fallback_limit, None)
            .await
        {
            Ok(hits) => hits.into_iter().map(PlaceResult::from).collect(),
            Err(e) => {
                warn!("Fallback search failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_action_lookup() {
        assert_eq!(quick_action_query("Cafes"), Some("cafe"));
        assert_eq!(quick_action_query("Attractions"), Some("tourist attraction"));
        assert_eq!(quick_action_query("Bowling"), None);
    }

    #[test]
    fn test_quick_actions_cover_all_categories() {
        let labels: Vec<&str> = QUICK_ACTIONS.iter().map(|action| action.label).collect();
        assert_eq!(
            labels,
            [
                "Cafes",
                "Food",
                "Hotels",
                "Attractions",
                "Hospital",
                "Fuel",
                "Mall",
                "Parks"
            ]
        );
    }
}
