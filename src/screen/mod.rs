//! The map screen.
//!
//! [`MapScreen`] owns a [`MapHost`] together with the handlers that react to
//! location updates, camera changes and button taps. Everything runs on the
//! main context: location callbacks and deferred tasks only post a
//! [`MainEvent`] into the screen's queue, and [`MapScreen::pump`] routes them.
//! Camera events the host queues during an operation are dispatched before
//! that operation returns.

pub mod buttons;
pub mod location;
pub mod slot;
pub mod tracker;

pub use buttons::{ButtonAction, ButtonPanel, MapButton};
pub use location::LocationUpdateHandler;
pub use slot::MarkerSlot;
pub use tracker::CameraTracker;

use crate::{
    core::{
        config::{LocationErrorConfig, ScreenConfig},
        constants::ALERT_DISMISS_TITLE,
        geo::LatLng,
    },
    host::{MapEvent, MapHost, MarkerHandle},
    location::LocationService,
    runtime::{DeferredTask, ScreenScope},
    MapError, Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use geo_types::{Geometry, LineString};
use std::time::Duration;

/// Work posted to the main context
#[derive(Debug, Clone, PartialEq)]
pub enum MainEvent {
    LocationUpdated(LatLng),
    LocationFailed,
    ShowAlert(Alert),
}

/// A modal message with a single dismiss button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn location_error(config: &LocationErrorConfig) -> Self {
        Self::new(&config.alert_title, &config.alert_message)
    }

    pub fn dismiss_title(&self) -> &'static str {
        ALERT_DISMISS_TITLE
    }
}

/// A route computed by a routing collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub geometry: LineString<f64>,
}

impl Route {
    pub fn new(geometry: LineString<f64>) -> Self {
        Self { geometry }
    }
}

/// Called with the tapped object and the tap position
pub type ObjectTapListener = Box<dyn FnMut(MarkerHandle, LatLng)>;

/// The screen controller
pub struct MapScreen<H: MapHost> {
    host: H,
    config: ScreenConfig,
    location: LocationUpdateHandler,
    tracker: CameraTracker,
    buttons: ButtonPanel,
    sender: Sender<MainEvent>,
    receiver: Receiver<MainEvent>,
    scope: ScreenScope,
    alert: Option<Alert>,
    pending_alert: Option<DeferredTask>,
    current_zoom: f64,
    routes: Vec<MarkerHandle>,
    tap_listener: Option<ObjectTapListener>,
}

impl<H: MapHost> MapScreen<H> {
    pub fn new(host: H, config: ScreenConfig) -> Result<Self> {
        config.validate()?;

        let location = LocationUpdateHandler::new(
            config.camera.clone(),
            config.animation.location_move(),
            config.location_error.fallback,
        );
        let (sender, receiver) = unbounded();

        Ok(Self {
            host,
            location,
            tracker: CameraTracker::new(),
            buttons: ButtonPanel::default(),
            sender,
            receiver,
            scope: ScreenScope::new(),
            alert: None,
            pending_alert: None,
            current_zoom: config.camera.zoom,
            routes: Vec::new(),
            tap_listener: None,
            config,
        })
    }

    /// Styles the map and lays out the buttons
    pub fn set_up(&mut self) -> Result<()> {
        self.host.attach(&self.config.style)?;
        self.buttons = ButtonPanel::new(&self.config.buttons.actions);
        log::info!(
            "map screen ready with {} style rules and {} buttons",
            self.config.style.rules().len(),
            self.buttons.len()
        );
        self.dispatch_host_events();
        Ok(())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn buttons(&self) -> &ButtonPanel {
        &self.buttons
    }

    /// Sender for posting work to this screen from any thread
    pub fn main_sender(&self) -> Sender<MainEvent> {
        self.sender.clone()
    }

    /// Routes the service's callbacks into the main-context queue and adopts
    /// its default location as the fallback
    pub fn bind_location_service(&mut self, service: &mut dyn LocationService) {
        let updates = self.sender.clone();
        service.set_update_callback(Box::new(move |location| {
            if updates.send(MainEvent::LocationUpdated(location)).is_err() {
                log::debug!("location update after the screen went away");
            }
        }));

        let errors = self.sender.clone();
        service.set_error_callback(Box::new(move || {
            if errors.send(MainEvent::LocationFailed).is_err() {
                log::debug!("location error after the screen went away");
            }
        }));

        let fallback = service.default_location();
        if fallback.is_valid() {
            self.location.set_fallback(fallback);
        } else {
            log::warn!(
                "ignoring invalid service default location {:?}, keeping {:?}",
                fallback,
                self.location.fallback()
            );
        }
    }

    /// Handles everything posted to the main context so far and returns how
    /// many events were handled
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.handle_main_event(event);
            handled += 1;
        }
        self.dispatch_host_events();
        handled
    }

    fn handle_main_event(&mut self, event: MainEvent) {
        match event {
            MainEvent::LocationUpdated(location) => self.on_location_update(location),
            MainEvent::LocationFailed => self.on_location_error(),
            MainEvent::ShowAlert(alert) => {
                self.pending_alert = None;
                if self.alert.is_some() {
                    log::debug!("alert already visible, dropping {:?}", alert.title);
                } else {
                    self.alert = Some(alert);
                }
            }
        }
    }

    /// Moves the user dot and the camera to a new fix
    pub fn on_location_update(&mut self, location: LatLng) {
        match self.location.on_location_update(&mut self.host, location) {
            Ok(()) => self.dispatch_host_events(),
            Err(MapError::LocationUnavailable) => self.on_location_error(),
            Err(e) => log::warn!("failed to show location {:?}: {}", location, e),
        }
    }

    /// Falls back to the default location and schedules the error alert
    pub fn on_location_error(&mut self) {
        log::warn!(
            "location unavailable, showing fallback {:?}",
            self.location.fallback()
        );
        if let Err(e) = self.location.on_location_error(&mut self.host) {
            log::error!("failed to show fallback location: {}", e);
        }
        self.schedule_alert(Alert::location_error(&self.config.location_error));
        self.dispatch_host_events();
    }

    fn schedule_alert(&mut self, alert: Alert) {
        let pending = self
            .pending_alert
            .as_ref()
            .is_some_and(|task| !task.is_finished());
        if self.alert.is_some() || pending {
            log::debug!("alert already pending, not scheduling another");
            return;
        }

        let sender = self.sender.clone();
        let task = self
            .scope
            .defer(self.config.location_error.alert_delay(), move || {
                if sender.send(MainEvent::ShowAlert(alert)).is_err() {
                    log::debug!("location alert after the screen went away");
                }
            });
        self.pending_alert = Some(task);
    }

    /// Plays host animations forward and dispatches the resulting camera
    /// events. Returns true while an animation is still running.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let running = self.host.advance(delta);
        self.dispatch_host_events();
        running
    }

    /// Delivers the events the host queued, oldest first, until none are left
    pub fn dispatch_host_events(&mut self) {
        loop {
            let events = self.host.take_events();
            if events.is_empty() {
                break;
            }

            for event in events {
                match event {
                    MapEvent::CameraChanged { camera, .. } => {
                        if let Err(e) = self
                            .tracker
                            .on_camera_position_changed(&mut self.host, camera.target)
                        {
                            log::warn!("failed to move tracking pin: {}", e);
                        }
                    }
                    MapEvent::ObjectTapped { handle, at } => match self.tap_listener.as_mut() {
                        Some(listener) => listener(handle, at),
                        None => log::debug!("{} tapped with no listener", handle),
                    },
                }
            }
        }
    }

    /// Runs the action of the button tagged `tag`
    pub fn tap(&mut self, tag: i32) -> Option<ButtonAction> {
        let user_location = self.user_location();
        let animation = self.config.animation.button_move();
        let result = self
            .buttons
            .dispatch(tag, &mut self.host, user_location, animation);
        self.dispatch_host_events();

        match result {
            Ok(()) => self.buttons.lookup(tag),
            Err(MapError::UnrecognizedButtonTag(tag)) => {
                log::warn!("no map button tagged {}", tag);
                None
            }
            Err(e) => {
                log::warn!("map button {} failed: {}", tag, e);
                None
            }
        }
    }

    /// Moves the camera to frame `geometry`, at `zoom` if given
    pub fn frame_geometry(&mut self, geometry: &Geometry<f64>, zoom: Option<f64>) -> Result<()> {
        let framed = self.host.camera_position_for_geometry(geometry)?;
        let (min_zoom, max_zoom) = self.host.zoom_range();
        let camera = framed.with_zoom(zoom.unwrap_or(framed.zoom).clamp(min_zoom, max_zoom));

        let moved = self
            .host
            .move_camera(camera, self.config.animation.framing_move());
        if moved.is_ok() {
            self.current_zoom = camera.zoom;
        }
        self.dispatch_host_events();
        moved
    }

    /// Draws the routes from a routing request. Returns the number drawn.
    pub fn on_routes(&mut self, routes: Result<Vec<Route>>) -> usize {
        let routes = match routes {
            Ok(routes) => routes,
            Err(e) => {
                log::warn!("route request failed: {}", e);
                return 0;
            }
        };

        let mut drawn = 0;
        for route in routes {
            match self.host.add_polyline(route.geometry) {
                Ok(handle) => {
                    self.routes.push(handle);
                    drawn += 1;
                }
                Err(e) => log::warn!("failed to draw route: {}", e),
            }
        }
        drawn
    }

    pub fn routes(&self) -> &[MarkerHandle] {
        &self.routes
    }

    pub fn set_object_tap_listener(&mut self, listener: impl FnMut(MarkerHandle, LatLng) + 'static) {
        self.tap_listener = Some(Box::new(listener));
    }

    /// The deferred alert waiting for its delay, if any
    pub fn pending_alert(&self) -> Option<&DeferredTask> {
        self.pending_alert.as_ref()
    }

    /// The alert currently on screen
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// Where the user dot is
    pub fn user_location(&self) -> Option<LatLng> {
        self.location.user_location(&self.host)
    }

    /// Where the tracking pin is
    pub fn pin_position(&self) -> Option<LatLng> {
        self.tracker.pin_position(&self.host)
    }

    pub fn user_dot(&self) -> Option<MarkerHandle> {
        self.location.user_dot().handle()
    }

    pub fn tracking_pin(&self) -> Option<MarkerHandle> {
        self.tracker.pin()
    }

    /// Zoom of the last geometry framing, or the default zoom
    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }
}
