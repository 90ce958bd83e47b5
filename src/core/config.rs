//! Configuration for the map screen
//!
//! The configuration is hierarchical: camera defaults, animation timings, the
//! location-error alert, button layout and the style sheet each live in their
//! own section. Every field has a default, so a JSON file only needs to name
//! what it changes.

use crate::core::{
    camera::{Animation, CameraState},
    constants::*,
    geo::LatLng,
    style::{default_style_sheet, StyleSheet},
};
use crate::screen::buttons::ButtonAction;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Camera parameters used for location-driven moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDefaults {
    pub zoom: f64,
    pub azimuth: f64,
    pub tilt: f64,
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            azimuth: DEFAULT_AZIMUTH,
            tilt: DEFAULT_TILT,
        }
    }
}

impl CameraDefaults {
    /// Camera looking at `target` with these defaults
    pub fn camera_at(&self, target: LatLng) -> CameraState {
        CameraState::new(target, self.zoom, self.azimuth, self.tilt)
    }
}

/// Durations, in seconds, of the screen's camera animations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub location_move_secs: f32,
    pub button_move_secs: f32,
    pub framing_move_secs: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            location_move_secs: LOCATION_MOVE_DURATION_SECS,
            button_move_secs: BUTTON_MOVE_DURATION_SECS,
            framing_move_secs: FRAMING_MOVE_DURATION_SECS,
        }
    }
}

impl AnimationConfig {
    pub fn location_move(&self) -> Animation {
        Animation::smooth(self.location_move_secs)
    }

    pub fn button_move(&self) -> Animation {
        Animation::smooth(self.button_move_secs)
    }

    pub fn framing_move(&self) -> Animation {
        Animation::smooth(self.framing_move_secs)
    }
}

/// What the user sees when no location fix is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationErrorConfig {
    /// Where the camera goes instead
    pub fallback: LatLng,
    pub alert_delay_ms: u64,
    pub alert_title: String,
    pub alert_message: String,
}

impl Default for LocationErrorConfig {
    fn default() -> Self {
        Self {
            fallback: LatLng::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE),
            alert_delay_ms: ALERT_DELAY_MS,
            alert_title: ALERT_LOCATION_ERROR_TITLE.to_string(),
            alert_message: ALERT_LOCATION_ERROR_MESSAGE.to_string(),
        }
    }
}

impl LocationErrorConfig {
    pub fn alert_delay(&self) -> Duration {
        Duration::from_millis(self.alert_delay_ms)
    }
}

/// Vertical button stack anchored to the trailing edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonPanelConfig {
    pub actions: Vec<ButtonAction>,
    pub button_size: f32,
    pub spacing: f32,
    pub trailing_margin: f32,
    pub center_y_offset: f32,
}

impl Default for ButtonPanelConfig {
    fn default() -> Self {
        Self {
            actions: ButtonAction::ALL.to_vec(),
            button_size: MAP_BUTTON_SIZE,
            spacing: MAP_BUTTONS_STACK_SPACING,
            trailing_margin: COMMON_HORIZONTAL_MARGIN,
            center_y_offset: MAP_BUTTONS_STACK_CENTER_Y_OFFSET,
        }
    }
}

/// Everything the screen can be tuned with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub camera: CameraDefaults,
    pub animation: AnimationConfig,
    pub location_error: LocationErrorConfig,
    pub buttons: ButtonPanelConfig,
    pub style: StyleSheet,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            camera: CameraDefaults::default(),
            animation: AnimationConfig::default(),
            location_error: LocationErrorConfig::default(),
            buttons: ButtonPanelConfig::default(),
            style: default_style_sheet(),
        }
    }
}

impl ScreenConfig {
    /// Parses a JSON configuration; missing sections fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects values the screen cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.location_error.fallback.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "fallback location {:?}",
                self.location_error.fallback
            )));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.camera.zoom) {
            return Err(MapError::Config(format!(
                "default zoom {} outside {}..={}",
                self.camera.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        for (name, secs) in [
            ("location_move_secs", self.animation.location_move_secs),
            ("button_move_secs", self.animation.button_move_secs),
            ("framing_move_secs", self.animation.framing_move_secs),
        ] {
            if !(0.0..=MAX_ANIMATION_SECS).contains(&secs) {
                return Err(MapError::Config(format!(
                    "animation {} = {} outside 0..={}",
                    name, secs, MAX_ANIMATION_SECS
                )));
            }
        }
        if self.buttons.button_size <= 0.0 {
            return Err(MapError::Config("button size must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.camera.zoom, DEFAULT_ZOOM);
        assert_eq!(config.location_error.alert_delay(), Duration::from_millis(500));
        assert_eq!(config.buttons.actions, ButtonAction::ALL.to_vec());
        assert_eq!(config.style, default_style_sheet());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = ScreenConfig::from_json_str(
            r#"{ "camera": { "zoom": 12.0 }, "location_error": { "alert_delay_ms": 100 } }"#,
        )
        .unwrap();

        assert_eq!(config.camera.zoom, 12.0);
        assert_eq!(config.camera.azimuth, DEFAULT_AZIMUTH);
        assert_eq!(config.location_error.alert_delay_ms, 100);
        assert_eq!(config.location_error.alert_title, ALERT_LOCATION_ERROR_TITLE);
        assert_eq!(config.style.rules().len(), 5);
    }

    #[test]
    fn test_empty_json_object_is_default() {
        let config = ScreenConfig::from_json_str("{}").unwrap();
        assert_eq!(config.camera, CameraDefaults::default());
        assert_eq!(config.buttons.actions.len(), 3);
        assert!(!config.style.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ScreenConfig::from_json_str(
            r#"{ "location_error": { "fallback": { "lat": 120.0, "lng": 0.0 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::InvalidCoordinates(_)));

        let err = ScreenConfig::from_json_str(r#"{ "camera": { "zoom": 40.0 } }"#).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));

        let err = ScreenConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_animation_durations_rejected_out_of_range() {
        for json in [
            r#"{ "animation": { "location_move_secs": 1e30 } }"#,
            r#"{ "animation": { "button_move_secs": 1e30 } }"#,
            r#"{ "animation": { "framing_move_secs": -0.5 } }"#,
        ] {
            let err = ScreenConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, MapError::Config(_)), "{}", json);
        }

        let config =
            ScreenConfig::from_json_str(r#"{ "animation": { "button_move_secs": 0.0 } }"#).unwrap();
        assert!(config.animation.button_move().is_immediate());
    }

    #[test]
    fn test_button_actions_from_json() {
        let config =
            ScreenConfig::from_json_str(r#"{ "buttons": { "actions": ["ZoomIn", "Recenter"] } }"#)
                .unwrap();
        assert_eq!(
            config.buttons.actions,
            vec![ButtonAction::ZoomIn, ButtonAction::Recenter]
        );
    }
}
