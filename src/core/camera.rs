use crate::core::{
    constants::{DEFAULT_AZIMUTH, DEFAULT_TILT, DEFAULT_ZOOM},
    geo::{LatLng, LatLngBounds, Point},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The map's viewport definition: what it looks at and from where
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub target: LatLng,
    pub zoom: f64,
    /// Clockwise rotation in degrees
    pub azimuth: f64,
    /// Inclination in degrees, 0 looks straight down
    pub tilt: f64,
}

impl CameraState {
    pub fn new(target: LatLng, zoom: f64, azimuth: f64, tilt: f64) -> Self {
        Self {
            target,
            zoom,
            azimuth,
            tilt,
        }
    }

    /// Same camera pointed somewhere else
    pub fn with_target(self, target: LatLng) -> Self {
        Self { target, ..self }
    }

    pub fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    /// Camera that frames `bounds` inside a viewport of `size` pixels.
    ///
    /// Picks the greatest zoom in `zoom_range` at which the projected box fits,
    /// keeping azimuth and tilt. A box collapsed to a point keeps the current zoom.
    pub fn framing(
        &self,
        bounds: &LatLngBounds,
        size: Point,
        padding: f64,
        zoom_range: (f64, f64),
    ) -> CameraState {
        let (min_zoom, max_zoom) = zoom_range;
        let center = bounds.center();
        if bounds.is_point() {
            return self.with_target(center);
        }

        let nw = LatLng::new(bounds.north_east.lat, bounds.south_west.lng).to_world_pixel(0.0);
        let se = LatLng::new(bounds.south_west.lat, bounds.north_east.lng).to_world_pixel(0.0);
        let width = (se.x - nw.x).abs();
        let height = (se.y - nw.y).abs();

        let available_x = (size.x - 2.0 * padding).max(1.0);
        let available_y = (size.y - 2.0 * padding).max(1.0);

        let scale_x = if width > 0.0 { available_x / width } else { f64::INFINITY };
        let scale_y = if height > 0.0 { available_y / height } else { f64::INFINITY };
        let zoom = scale_x.min(scale_y).log2().clamp(min_zoom, max_zoom);

        CameraState::new(center, zoom, self.azimuth, self.tilt)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(LatLng::default(), DEFAULT_ZOOM, DEFAULT_AZIMUTH, DEFAULT_TILT)
    }
}

/// Interpolation curve of a camera animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationKind {
    #[default]
    Smooth,
    Linear,
}

/// How a camera move is played out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub kind: AnimationKind,
    pub duration: Duration,
}

impl Animation {
    pub fn smooth(seconds: f32) -> Self {
        Self {
            kind: AnimationKind::Smooth,
            duration: seconds_to_duration(seconds),
        }
    }

    pub fn linear(seconds: f32) -> Self {
        Self {
            kind: AnimationKind::Linear,
            duration: seconds_to_duration(seconds),
        }
    }

    /// Jump without interpolation
    pub fn immediate() -> Self {
        Self {
            kind: AnimationKind::Linear,
            duration: Duration::ZERO,
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.duration.is_zero()
    }
}

/// Why the camera moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraUpdateReason {
    /// The user dragged, pinched or scrolled the map
    Gestures,
    /// Code asked for the move
    Application,
}

/// Negative, NaN and unrepresentable lengths play as an immediate jump
fn seconds_to_duration(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or_default()
}
