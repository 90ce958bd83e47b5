//! # pinmap
//!
//! A single map screen: a user dot driven by location updates, a pin that
//! follows the camera, and a small panel of zoom / recenter buttons.
//!
//! The map widget itself sits behind the [`host::MapHost`] trait.
//! [`host::MemoryMap`] implements it in process, and the `egui` feature adds a
//! surface that draws it.

pub mod animation;
pub mod core;
pub mod host;
pub mod location;
pub mod prelude;
pub mod runtime;
pub mod screen;
#[cfg(feature = "egui")]
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    camera::{Animation, AnimationKind, CameraState, CameraUpdateReason},
    config::ScreenConfig,
    geo::{LatLng, LatLngBounds, Point},
    style::StyleSheet,
};

pub use host::{HostState, Icon, IconStyle, MapEvent, MapHost, MarkerHandle, MemoryMap};

pub use location::{LocationService, ScriptStep, ScriptedLocationService};

pub use screen::{Alert, ButtonAction, MainEvent, MapScreen, Route};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map host is not ready")]
    NotReady,

    #[error("unknown marker {0}")]
    UnknownMarker(MarkerHandle),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("geometry has no extent")]
    EmptyGeometry,

    #[error("Style sheet error: {0}")]
    Style(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("location unavailable")]
    LocationUnavailable,

    #[error("route request failed: {0}")]
    RouteRequestFailed(String),

    #[error("unrecognized button tag {0}")]
    UnrecognizedButtonTag(i32),
}

/// Error type alias for convenience
pub type Error = MapError;
