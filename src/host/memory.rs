use crate::{
    animation::CameraTransition,
    core::{
        camera::{Animation, CameraState, CameraUpdateReason},
        constants::{FRAMING_PADDING, MAX_ZOOM, MIN_ZOOM},
        geo::{LatLng, LatLngBounds, Point},
        style::StyleSheet,
    },
    host::{HostState, Icon, IconStyle, MapEvent, MapHost, MarkerHandle},
    MapError, Result,
};
use fxhash::FxHashMap;
use geo::BoundingRect;
use geo_types::{Geometry, LineString};
use std::time::Duration;

/// A point-anchored icon on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    pub position: LatLng,
    pub icon: Icon,
    pub style: IconStyle,
}

#[derive(Debug, Clone, PartialEq)]
enum MapObject {
    Placemark(Placemark),
    Polyline(LineString<f64>),
}

/// In-process map host.
///
/// Keeps camera and objects in memory, plays camera animations when
/// [`MapHost::advance`] is called and queues every camera change as a
/// [`MapEvent`]. Screen coordinates are pixels relative to the viewport's
/// top-left corner.
#[derive(Debug)]
pub struct MemoryMap {
    state: HostState,
    camera: CameraState,
    transition: Option<CameraTransition>,
    objects: FxHashMap<MarkerHandle, MapObject>,
    next_id: u64,
    events: Vec<MapEvent>,
    style: StyleSheet,
    size: Point,
    min_zoom: f64,
    max_zoom: f64,
}

impl MemoryMap {
    pub fn new(size: Point) -> Self {
        Self {
            state: HostState::Uninitialized,
            camera: CameraState::default(),
            transition: None,
            objects: FxHashMap::default(),
            next_id: 1,
            events: Vec::new(),
            style: StyleSheet::default(),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Starts looking at `camera` instead of the default
    pub fn with_camera(mut self, camera: CameraState) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.camera.zoom = self.camera.zoom.clamp(min_zoom, max_zoom);
        self
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Camera the running animation will end at, or the current one
    pub fn target_camera(&self) -> CameraState {
        self.transition
            .as_ref()
            .map(|t| t.target())
            .unwrap_or(self.camera)
    }

    /// Jumps the running animation to its end
    pub fn finish_animation(&mut self) {
        if self.transition.is_some() {
            self.advance(Duration::MAX);
        }
    }

    /// Drags the map by a screen-space delta, as a finger would
    pub fn pan_by_pixels(&mut self, delta: Point) -> Result<()> {
        self.ensure_ready()?;
        let center = self.camera.target.to_world_pixel(self.camera.zoom);
        let moved = center.subtract(&self.rotate(delta, -self.camera.azimuth));
        let target = LatLng::from_world_pixel(moved, self.camera.zoom);
        let target = LatLng::new(LatLng::clamp_lat(target.lat), LatLng::wrap_lng(target.lng));
        self.apply_gesture(self.camera.with_target(target));
        Ok(())
    }

    /// Pinch or scroll zoom around the camera target
    pub fn zoom_by(&mut self, delta: f64) -> Result<()> {
        self.ensure_ready()?;
        let zoom = (self.camera.zoom + delta).clamp(self.min_zoom, self.max_zoom);
        self.apply_gesture(self.camera.with_zoom(zoom));
        Ok(())
    }

    /// Reports a tap at a screen position; the topmost placemark within
    /// `tolerance` pixels receives it
    pub fn tap(&mut self, screen: Point, tolerance: f64) -> Option<MarkerHandle> {
        if !self.is_ready() {
            return None;
        }
        let (handle, at) = self
            .placemarks()
            .filter(|(_, placemark)| placemark.style.visible)
            .map(|(handle, placemark)| {
                let distance = self.to_screen(placemark.position).distance_to(&screen);
                (handle, placemark, distance)
            })
            .filter(|(_, _, distance)| *distance <= tolerance)
            .max_by(|a, b| {
                a.1.style
                    .z_index
                    .total_cmp(&b.1.style.z_index)
                    .then(b.2.total_cmp(&a.2))
            })
            .map(|(handle, placemark, _)| (handle, placemark.position))?;

        self.events.push(MapEvent::ObjectTapped { handle, at });
        Some(handle)
    }

    /// All placemarks, in no particular order
    pub fn placemarks(&self) -> impl Iterator<Item = (MarkerHandle, &Placemark)> {
        self.objects.iter().filter_map(|(handle, object)| match object {
            MapObject::Placemark(placemark) => Some((*handle, placemark)),
            MapObject::Polyline(_) => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = (MarkerHandle, &LineString<f64>)> {
        self.objects.iter().filter_map(|(handle, object)| match object {
            MapObject::Polyline(line) => Some((*handle, line)),
            MapObject::Placemark(_) => None,
        })
    }

    pub fn placemark(&self, handle: MarkerHandle) -> Option<&Placemark> {
        match self.objects.get(&handle) {
            Some(MapObject::Placemark(placemark)) => Some(placemark),
            _ => None,
        }
    }

    pub fn placemark_count(&self) -> usize {
        self.placemarks().count()
    }

    /// Projects a coordinate into viewport pixels
    pub fn to_screen(&self, lat_lng: LatLng) -> Point {
        let center = self.camera.target.to_world_pixel(self.camera.zoom);
        let offset = lat_lng.to_world_pixel(self.camera.zoom).subtract(&center);
        self.rotate(offset, self.camera.azimuth)
            .add(&self.size.multiply(0.5))
    }

    /// Inverse of [`MemoryMap::to_screen`]
    pub fn from_screen(&self, screen: Point) -> LatLng {
        let center = self.camera.target.to_world_pixel(self.camera.zoom);
        let offset = self.rotate(screen.subtract(&self.size.multiply(0.5)), -self.camera.azimuth);
        LatLng::from_world_pixel(center.add(&offset), self.camera.zoom)
    }

    /// Rotates a screen-space vector clockwise by `degrees`
    fn rotate(&self, point: Point, degrees: f64) -> Point {
        if degrees == 0.0 {
            return point;
        }
        let (sin, cos) = (-degrees).to_radians().sin_cos();
        Point::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
    }

    fn apply_gesture(&mut self, camera: CameraState) {
        self.transition = None;
        self.camera = camera;
        self.events.push(MapEvent::CameraChanged {
            camera,
            reason: CameraUpdateReason::Gestures,
            finished: true,
        });
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            HostState::Ready => Ok(()),
            HostState::Uninitialized => Err(MapError::NotReady),
        }
    }

    fn next_handle(&mut self) -> MarkerHandle {
        let handle = MarkerHandle::new(self.next_id);
        self.next_id += 1;
        handle
    }

    fn validate(at: LatLng) -> Result<()> {
        if at.is_valid() {
            Ok(())
        } else {
            Err(MapError::InvalidCoordinates(format!("{:?}", at)))
        }
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::new(Point::new(390.0, 844.0))
    }
}

impl MapHost for MemoryMap {
    fn state(&self) -> HostState {
        self.state
    }

    fn attach(&mut self, style: &StyleSheet) -> Result<()> {
        self.style = style.clone();
        if self.state == HostState::Uninitialized {
            log::debug!("map host attached with {} style rules", style.rules().len());
        }
        self.state = HostState::Ready;
        Ok(())
    }

    fn apply_style(&mut self, style: &StyleSheet) -> Result<()> {
        self.ensure_ready()?;
        self.style = style.clone();
        Ok(())
    }

    fn camera(&self) -> CameraState {
        self.camera
    }

    fn zoom_range(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    fn move_camera(&mut self, target: CameraState, animation: Animation) -> Result<()> {
        self.ensure_ready()?;
        Self::validate(target.target)?;

        let (min_zoom, max_zoom) = self.zoom_range();
        let target = target.with_zoom(target.zoom.clamp(min_zoom, max_zoom));
        let transition = CameraTransition::new(self.camera, target, animation);

        if transition.is_finished() {
            self.transition = None;
            self.camera = target;
            self.events.push(MapEvent::CameraChanged {
                camera: target,
                reason: CameraUpdateReason::Application,
                finished: true,
            });
        } else {
            // A new move replaces the running one, starting from where it got to
            self.transition = Some(transition);
        }
        Ok(())
    }

    fn place_marker(&mut self, at: LatLng, icon: Icon, style: IconStyle) -> Result<MarkerHandle> {
        self.ensure_ready()?;
        Self::validate(at)?;

        let handle = self.next_handle();
        self.objects.insert(
            handle,
            MapObject::Placemark(Placemark {
                position: at,
                icon,
                style,
            }),
        );
        Ok(handle)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) -> Result<()> {
        self.ensure_ready()?;
        self.objects
            .remove(&handle)
            .map(|_| ())
            .ok_or(MapError::UnknownMarker(handle))
    }

    fn set_marker_position(&mut self, handle: MarkerHandle, at: LatLng) -> Result<()> {
        self.ensure_ready()?;
        Self::validate(at)?;

        match self.objects.get_mut(&handle) {
            Some(MapObject::Placemark(placemark)) => {
                placemark.position = at;
                Ok(())
            }
            _ => Err(MapError::UnknownMarker(handle)),
        }
    }

    fn marker_position(&self, handle: MarkerHandle) -> Option<LatLng> {
        self.placemark(handle).map(|placemark| placemark.position)
    }

    fn camera_position_for_geometry(&self, geometry: &Geometry<f64>) -> Result<CameraState> {
        self.ensure_ready()?;
        let rect = geometry.bounding_rect().ok_or(MapError::EmptyGeometry)?;
        let bounds = LatLngBounds::from(rect);

        Ok(self.camera.framing(
            &bounds,
            self.size,
            FRAMING_PADDING,
            self.zoom_range(),
        ))
    }

    fn add_polyline(&mut self, line: LineString<f64>) -> Result<MarkerHandle> {
        self.ensure_ready()?;
        if line.0.len() < 2 {
            return Err(MapError::EmptyGeometry);
        }

        let handle = self.next_handle();
        self.objects.insert(handle, MapObject::Polyline(line));
        Ok(handle)
    }

    fn take_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    /// Plays the running animation forward by `delta`.
    ///
    /// Returns true while an animation is still running afterwards.
    fn advance(&mut self, delta: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };

        self.camera = transition.update(delta);
        let finished = transition.is_finished();
        self.events.push(MapEvent::CameraChanged {
            camera: self.camera,
            reason: CameraUpdateReason::Application,
            finished,
        });

        if finished {
            self.transition = None;
        }
        !finished
    }
}
