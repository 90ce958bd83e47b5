use crate::{
    core::{camera::Animation, config::CameraDefaults, geo::LatLng},
    host::{Icon, IconStyle, MapHost},
    screen::slot::MarkerSlot,
    MapError, Result,
};

/// Turns location fixes into a user dot and a camera move
#[derive(Debug)]
pub struct LocationUpdateHandler {
    user_dot: MarkerSlot,
    camera: CameraDefaults,
    animation: Animation,
    fallback: LatLng,
}

impl LocationUpdateHandler {
    pub fn new(camera: CameraDefaults, animation: Animation, fallback: LatLng) -> Self {
        Self {
            user_dot: MarkerSlot::new(),
            camera,
            animation,
            fallback,
        }
    }

    pub fn fallback(&self) -> LatLng {
        self.fallback
    }

    pub fn set_fallback(&mut self, fallback: LatLng) {
        self.fallback = fallback;
    }

    /// Replaces the user dot and flies the camera to `location`.
    ///
    /// Out of range coordinates are reported as `LocationUnavailable` and
    /// leave the map untouched.
    pub fn on_location_update<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        location: LatLng,
    ) -> Result<()> {
        if !location.is_valid() {
            log::warn!("discarding out of range fix {:?}", location);
            return Err(MapError::LocationUnavailable);
        }

        self.user_dot
            .replace(host, location, Icon::user_location(), IconStyle::user_dot())?;
        host.move_camera(self.camera.camera_at(location), self.animation)
    }

    /// Shows the fallback location the same way a fix would be shown
    pub fn on_location_error<H: MapHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        self.on_location_update(host, self.fallback)
    }

    /// Last position the user dot was placed at
    pub fn user_location<H: MapHost + ?Sized>(&self, host: &H) -> Option<LatLng> {
        self.user_dot.position(host)
    }

    pub fn user_dot(&self) -> &MarkerSlot {
        &self.user_dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{camera::CameraState, geo::Point, style::StyleSheet};
    use crate::host::{MapEvent, MemoryMap};

    fn ready_map() -> MemoryMap {
        let mut map = MemoryMap::new(Point::new(400.0, 800.0));
        map.attach(&StyleSheet::default()).unwrap();
        map
    }

    fn handler() -> LocationUpdateHandler {
        LocationUpdateHandler::new(
            CameraDefaults::default(),
            Animation::smooth(1.0),
            LatLng::new(55.75, 37.61),
        )
    }

    #[test]
    fn test_update_places_dot_and_moves_camera() {
        let mut map = ready_map();
        let mut handler = handler();
        let spb = LatLng::new(59.961075, 30.260612);

        handler.on_location_update(&mut map, spb).unwrap();
        assert_eq!(handler.user_location(&map), Some(spb));
        assert_eq!(
            map.target_camera(),
            CameraState::new(spb, CameraDefaults::default().zoom, 0.0, 0.0)
        );

        let dot = map.placemark(handler.user_dot().handle().unwrap()).unwrap();
        assert_eq!(dot.icon, Icon::user_location());
        assert_eq!(dot.style, IconStyle::user_dot());
    }

    #[test]
    fn test_rapid_updates_last_write_wins() {
        let mut map = ready_map();
        let mut handler = handler();

        for i in 0..10 {
            let location = LatLng::new(59.9 + i as f64 * 0.001, 30.2);
            handler.on_location_update(&mut map, location).unwrap();
            assert!(map.placemark_count() <= 1);
        }

        map.finish_animation();
        let last = LatLng::new(59.9 + 9.0 * 0.001, 30.2);
        assert_eq!(handler.user_location(&map), Some(last));
        assert_eq!(map.camera().target, last);
    }

    #[test]
    fn test_error_moves_to_fallback() {
        let mut map = ready_map();
        let mut handler = handler();

        handler.on_location_error(&mut map).unwrap();
        map.finish_animation();
        assert_eq!(map.camera().target, LatLng::new(55.75, 37.61));
        assert_eq!(handler.user_location(&map), Some(LatLng::new(55.75, 37.61)));
    }

    #[test]
    fn test_invalid_fix_is_location_unavailable() {
        let mut map = ready_map();
        let mut handler = handler();

        let err = handler
            .on_location_update(&mut map, LatLng::new(f64::NAN, 30.0))
            .unwrap_err();
        assert!(matches!(err, MapError::LocationUnavailable));
        assert_eq!(map.placemark_count(), 0);
        assert!(map
            .take_events()
            .iter()
            .all(|event| !matches!(event, MapEvent::CameraChanged { .. })));
    }
}
