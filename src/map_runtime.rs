//! Map library handle and viewport constants
//!
//! The mapping widget is an external collaborator that loads lazily; this
//! module models that handle as a process-wide init-once singleton with a
//! readiness flag the UI polls before rendering map-dependent elements.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::config::ExplorerConfig;

/// Zoom of the initial viewport around the default location
pub const INITIAL_ZOOM: u8 = 12;
/// Zoom used when flying to a selected place
pub const SELECTION_ZOOM: u8 = 17;
/// Zoom used when recentering on a coarse network-inferred location
pub const NETWORK_RECENTER_ZOOM: u8 = 14;

/// A selectable tile style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileStyle {
    pub key: &'static str,
    pub name: &'static str,
    pub url_template: &'static str,
}

/// Available base-map styles
pub const TILE_STYLES: [TileStyle; 4] = [
    TileStyle {
        key: "streets",
        name: "Streets",
        url_template: "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png",
    },
    TileStyle {
        key: "light",
        name: "Light",
        url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
    },
    TileStyle {
        key: "dark",
        name: "Dark",
        url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
    },
    TileStyle {
        key: "satellite",
        name: "Satellite",
        url_template:
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    },
];

/// Marker image assets for the default icon set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAssets {
    pub icon_url: &'static str,
    pub icon_retina_url: &'static str,
    pub shadow_url: &'static str,
}

/// Initial map viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl Viewport {
    /// Fly-to target for a selected place
    #[must_use]
    pub fn for_selection(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            zoom: SELECTION_ZOOM,
        }
    }

    /// Fly-to target when recentering on a coarse network-inferred location
    #[must_use]
    pub fn for_network_recenter(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            zoom: NETWORK_RECENTER_ZOOM,
        }
    }
}

/// The lazily-initialized map library handle
#[derive(Debug, Clone, PartialEq)]
pub struct MapRuntime {
    pub marker_assets: MarkerAssets,
    pub initial_viewport: Viewport,
}

static RUNTIME: OnceLock<MapRuntime> = OnceLock::new();
static READY: AtomicBool = AtomicBool::new(false);

impl MapRuntime {
    /// Initialize the shared handle, once; later calls return the existing
    /// instance unchanged.
    pub fn initialize(config: &ExplorerConfig) -> &'static MapRuntime {
        let runtime = RUNTIME.get_or_init(|| MapRuntime {
            marker_assets: MarkerAssets {
                icon_url:
                    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.7.1/images/marker-icon.png",
                icon_retina_url:
                    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.7.1/images/marker-icon-2x.png",
                shadow_url:
                    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.7.1/images/marker-shadow.png",
            },
            initial_viewport: Viewport {
                latitude: config.default_location.latitude,
                longitude: config.default_location.longitude,
                zoom: INITIAL_ZOOM,
            },
        });
        READY.store(true, Ordering::SeqCst);
        runtime
    }

    /// Readiness flag polled before rendering map-dependent elements
    #[must_use]
    pub fn ready() -> bool {
        READY.load(Ordering::SeqCst)
    }

    /// The shared handle, if initialized
    #[must_use]
    pub fn get() -> Option<&'static MapRuntime> {
        RUNTIME.get()
    }

    /// Look up a tile style by key
    #[must_use]
    pub fn style(key: &str) -> Option<&'static TileStyle> {
        TILE_STYLES.iter().find(|style| style.key == key)
    }
}
