use crate::{
    core::geo::LatLng,
    host::{Icon, IconStyle, MapHost, MarkerHandle},
    MapError, Result,
};

/// Keeps a pin on the camera's focal point.
///
/// The pin is created on the first camera change and then moved in place,
/// never removed and re-added.
#[derive(Debug, Default)]
pub struct CameraTracker {
    pin: Option<MarkerHandle>,
}

impl CameraTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self) -> Option<MarkerHandle> {
        self.pin
    }

    pub fn on_camera_position_changed<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: LatLng,
    ) -> Result<MarkerHandle> {
        if let Some(pin) = self.pin {
            match host.set_marker_position(pin, target) {
                Ok(()) => return Ok(pin),
                Err(MapError::UnknownMarker(_)) => {
                    log::debug!("tracking pin {} vanished, placing a new one", pin);
                    self.pin = None;
                }
                Err(e) => return Err(e),
            }
        }

        let pin = host.place_marker(target, Icon::location_pin(), IconStyle::tracking_pin())?;
        self.pin = Some(pin);
        Ok(pin)
    }

    pub fn pin_position<H: MapHost + ?Sized>(&self, host: &H) -> Option<LatLng> {
        self.pin.and_then(|pin| host.marker_position(pin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{geo::Point, style::StyleSheet};
    use crate::host::MemoryMap;

    fn ready_map() -> MemoryMap {
        let mut map = MemoryMap::new(Point::new(400.0, 800.0));
        map.attach(&StyleSheet::default()).unwrap();
        map
    }

    #[test]
    fn test_pin_created_lazily_then_moved_in_place() {
        let mut map = ready_map();
        let mut tracker = CameraTracker::new();
        assert_eq!(tracker.pin(), None);

        let first = tracker
            .on_camera_position_changed(&mut map, LatLng::new(59.96, 30.26))
            .unwrap();
        let second = tracker
            .on_camera_position_changed(&mut map, LatLng::new(59.97, 30.27))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(map.placemark_count(), 1);
        assert_eq!(tracker.pin_position(&map), Some(LatLng::new(59.97, 30.27)));
    }

    #[test]
    fn test_pin_follows_nth_event_without_drift() {
        let mut map = ready_map();
        let mut tracker = CameraTracker::new();
        let targets: Vec<LatLng> = (0..25)
            .map(|i| LatLng::new(59.9 + i as f64 * 0.003, 30.2 - i as f64 * 0.002))
            .collect();

        for (n, target) in targets.iter().enumerate() {
            tracker.on_camera_position_changed(&mut map, *target).unwrap();
            assert_eq!(tracker.pin_position(&map), Some(targets[n]));
            assert_eq!(map.placemark_count(), 1);
        }
    }

    #[test]
    fn test_same_event_twice_is_idempotent() {
        let mut map = ready_map();
        let mut tracker = CameraTracker::new();
        let target = LatLng::new(59.961075, 30.260612);

        tracker.on_camera_position_changed(&mut map, target).unwrap();
        let after_first = tracker.pin_position(&map);
        tracker.on_camera_position_changed(&mut map, target).unwrap();

        assert_eq!(tracker.pin_position(&map), after_first);
        assert_eq!(map.placemark_count(), 1);
    }

    #[test]
    fn test_vanished_pin_is_replaced() {
        let mut map = ready_map();
        let mut tracker = CameraTracker::new();
        let pin = tracker
            .on_camera_position_changed(&mut map, LatLng::new(1.0, 1.0))
            .unwrap();
        map.remove_marker(pin).unwrap();

        let replacement = tracker
            .on_camera_position_changed(&mut map, LatLng::new(2.0, 2.0))
            .unwrap();
        assert_ne!(pin, replacement);
        assert_eq!(tracker.pin_position(&map), Some(LatLng::new(2.0, 2.0)));
    }
}
