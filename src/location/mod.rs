//! The location-service collaborator.
//!
//! Sensing is not done here: a [`LocationService`] reports fixes and failures
//! through two callback slots, from whatever thread it likes. The screen's
//! callbacks only enqueue onto its main-context queue.

pub mod scripted;

pub use scripted::{ScriptStep, ScriptedLocationService};

use crate::core::geo::LatLng;

/// Receives each new location fix
pub type LocationUpdatedCallback = Box<dyn Fn(LatLng) + Send + Sync>;

/// Receives each failure to produce a fix
pub type LocationErrorCallback = Box<dyn Fn() + Send + Sync>;

/// A source of location updates
pub trait LocationService {
    /// Replaces the update slot
    fn set_update_callback(&mut self, callback: LocationUpdatedCallback);

    /// Replaces the error slot
    fn set_error_callback(&mut self, callback: LocationErrorCallback);

    /// Where to look when there is no fix
    fn default_location(&self) -> LatLng;

    /// Begins delivering updates
    fn start(&mut self);

    /// Stops delivering updates; callbacks stay installed
    fn stop(&mut self);
}
