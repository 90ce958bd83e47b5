//! The map widget capability boundary.
//!
//! Everything the screen needs from a map widget goes through [`MapHost`]:
//! camera moves, marker placement, geometry framing, styling and the
//! camera-change event stream. [`memory::MemoryMap`] is the in-process
//! implementation used by the app and the tests.

pub mod memory;

pub use memory::MemoryMap;

use crate::core::{
    camera::{Animation, CameraState, CameraUpdateReason},
    constants::{LOCATION_PIN_ICON, MAX_ZOOM, MIN_ZOOM, USER_DOT_SCALE, USER_LOCATION_ICON},
    geo::LatLng,
    style::StyleSheet,
};
use crate::Result;
use geo_types::{Geometry, LineString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lifecycle of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// Not attached to a view yet; every camera and marker operation fails
    Uninitialized,
    /// Attached and styled
    Ready,
}

/// Opaque id of an object placed on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Named image drawn for a marker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Icon(String);

impl Icon {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn user_location() -> Self {
        Self::new(USER_LOCATION_ICON)
    }

    pub fn location_pin() -> Self {
        Self::new(LOCATION_PIN_ICON)
    }
}

/// Whether an icon turns with the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RotationType {
    NoRotation,
    #[default]
    Rotate,
}

/// How a marker icon is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    /// Hot-spot inside the image, (0.5, 0.5) is the centre
    pub anchor: (f32, f32),
    pub rotation: RotationType,
    pub z_index: f32,
    /// Lies on the map plane instead of facing the viewer
    pub flat: bool,
    pub visible: bool,
    pub scale: f32,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            anchor: (0.5, 0.5),
            rotation: RotationType::Rotate,
            z_index: 0.0,
            flat: true,
            visible: true,
            scale: 1.0,
        }
    }
}

impl IconStyle {
    /// Style of the "you are here" dot
    pub fn user_dot() -> Self {
        Self {
            scale: USER_DOT_SCALE,
            ..Self::default()
        }
    }

    /// Style of the pin that follows the camera
    pub fn tracking_pin() -> Self {
        Self::default()
    }
}

/// Something the host wants the screen to know about
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The camera moved; emitted on every animation step
    CameraChanged {
        camera: CameraState,
        reason: CameraUpdateReason,
        finished: bool,
    },
    /// A placed object was tapped
    ObjectTapped { handle: MarkerHandle, at: LatLng },
}

/// Capabilities the screen needs from a map widget
pub trait MapHost {
    fn state(&self) -> HostState;

    /// Attaches the widget and applies the style sheet: Uninitialized → Ready
    fn attach(&mut self, style: &StyleSheet) -> Result<()>;

    /// Replaces the style sheet of an attached widget
    fn apply_style(&mut self, style: &StyleSheet) -> Result<()>;

    /// Current camera, mid-animation if one is running
    fn camera(&self) -> CameraState;

    fn move_camera(&mut self, target: CameraState, animation: Animation) -> Result<()>;

    fn place_marker(&mut self, at: LatLng, icon: Icon, style: IconStyle) -> Result<MarkerHandle>;

    fn remove_marker(&mut self, handle: MarkerHandle) -> Result<()>;

    /// Moves an existing marker without re-creating it
    fn set_marker_position(&mut self, handle: MarkerHandle, at: LatLng) -> Result<()>;

    fn marker_position(&self, handle: MarkerHandle) -> Option<LatLng>;

    /// Camera that frames the whole geometry
    fn camera_position_for_geometry(&self, geometry: &Geometry<f64>) -> Result<CameraState>;

    /// Draws a line, e.g. a route, and returns its handle
    fn add_polyline(&mut self, line: LineString<f64>) -> Result<MarkerHandle>;

    /// Drains the events emitted since the last call, oldest first
    fn take_events(&mut self) -> Vec<MapEvent>;

    /// Plays running camera animations forward by `delta`. Returns true
    /// while one is still running. Hosts that animate on their own clock
    /// keep the default.
    fn advance(&mut self, _delta: Duration) -> bool {
        false
    }

    /// Zoom levels `move_camera` clamps to, inclusive
    fn zoom_range(&self) -> (f64, f64) {
        (MIN_ZOOM, MAX_ZOOM)
    }

    fn is_ready(&self) -> bool {
        self.state() == HostState::Ready
    }
}
