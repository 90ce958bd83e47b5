//! Prelude module for common pinmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use pinmap::prelude::*;`

pub use crate::core::{
    camera::{Animation, AnimationKind, CameraState, CameraUpdateReason},
    config::{
        AnimationConfig, ButtonPanelConfig, CameraDefaults, LocationErrorConfig, ScreenConfig,
    },
    geo::{LatLng, LatLngBounds, Point},
    style::{default_style_sheet, StyleRule, StyleSheet, Stylers},
};

pub use crate::host::{
    HostState, Icon, IconStyle, MapEvent, MapHost, MarkerHandle, MemoryMap, RotationType,
};

pub use crate::location::{
    LocationErrorCallback, LocationService, LocationUpdatedCallback, ScriptStep,
    ScriptedLocationService,
};

pub use crate::screen::{Alert, ButtonAction, ButtonPanel, MainEvent, MapScreen, Route};

pub use crate::runtime::{DeferredTask, ScreenScope};

pub use crate::animation::{CameraTransition, EasingType};

#[cfg(feature = "egui")]
pub use crate::ui::{MapCanvas, ScreenView};

pub use crate::{MapError, Result};
