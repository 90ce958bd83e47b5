//! Screen-wide defaults. Keeping them in a single place makes it easier to
//! tweak the magic numbers the screen and its host share.

/// Square tile size in pixels used by the Web Mercator pixel projection.
pub const TILE_SIZE: u32 = 256;

/// Zoom the camera settles at after a location fix.
pub const DEFAULT_ZOOM: f64 = 15.0;

/// Azimuth used for location-driven camera moves.
pub const DEFAULT_AZIMUTH: f64 = 0.0;

/// Tilt used for location-driven camera moves.
pub const DEFAULT_TILT: f64 = 0.0;

/// Zoom range accepted by the in-memory host.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 21.0;

/// Seconds a location-driven camera move takes.
pub const LOCATION_MOVE_DURATION_SECS: f32 = 1.0;

/// Seconds a button-driven camera move takes.
pub const BUTTON_MOVE_DURATION_SECS: f32 = 1.0;

/// Seconds a geometry-framing camera move takes.
pub const FRAMING_MOVE_DURATION_SECS: f32 = 0.3;

/// Longest camera animation a config may ask for, in seconds
pub const MAX_ANIMATION_SECS: f32 = 60.0;

/// Delay between a location failure and its alert.
pub const ALERT_DELAY_MS: u64 = 500;

/// Used when the location service cannot produce a fix.
pub const FALLBACK_LATITUDE: f64 = 59.961075;
pub const FALLBACK_LONGITUDE: f64 = 30.260612;

pub const ALERT_LOCATION_ERROR_TITLE: &str = "Location unavailable";
pub const ALERT_LOCATION_ERROR_MESSAGE: &str =
    "Location access was not granted. Please enable it in Settings.";
pub const ALERT_DISMISS_TITLE: &str = "OK";

pub const USER_LOCATION_ICON: &str = "user_location";
pub const LOCATION_PIN_ICON: &str = "location_pin_light";

/// Scale of the user dot relative to its source image.
pub const USER_DOT_SCALE: f32 = 0.1;

/// Pixels of padding kept around a framed geometry.
pub const FRAMING_PADDING: f64 = 20.0;

/// Button panel layout (points).
pub const MAP_BUTTON_SIZE: f32 = 48.0;
pub const MAP_BUTTONS_STACK_SPACING: f32 = 8.0;
pub const COMMON_HORIZONTAL_MARGIN: f32 = 16.0;
pub const MAP_BUTTONS_STACK_CENTER_Y_OFFSET: f32 = 0.0;
