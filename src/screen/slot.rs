use crate::{
    core::geo::LatLng,
    host::{Icon, IconStyle, MapHost, MarkerHandle},
    MapError, Result,
};

/// Owns at most one marker on a host.
///
/// Updating the slot releases the held marker before placing the new one, so
/// the host never shows two markers for the same slot.
#[derive(Debug, Default)]
pub struct MarkerSlot {
    handle: Option<MarkerHandle>,
}

impl MarkerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<MarkerHandle> {
        self.handle
    }

    pub fn is_occupied(&self) -> bool {
        self.handle.is_some()
    }

    /// Removes the held marker, then places a new one at `at`
    pub fn replace<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        at: LatLng,
        icon: Icon,
        style: IconStyle,
    ) -> Result<MarkerHandle> {
        self.release(host)?;
        let handle = host.place_marker(at, icon, style)?;
        self.handle = Some(handle);
        Ok(handle)
    }

    /// Removes the held marker, if any. A marker the host already forgot
    /// counts as released.
    pub fn release<H: MapHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        match host.remove_marker(handle) {
            Ok(()) => Ok(()),
            Err(MapError::UnknownMarker(_)) => {
                log::debug!("{} was already gone from the map", handle);
                Ok(())
            }
            Err(e) => {
                self.handle = Some(handle);
                Err(e)
            }
        }
    }

    /// Where the held marker currently is
    pub fn position<H: MapHost + ?Sized>(&self, host: &H) -> Option<LatLng> {
        self.handle.and_then(|handle| host.marker_position(handle))
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
    fn test_replace_keeps_single_marker() {
        let mut map = ready_map();
        let mut slot = MarkerSlot::new();

        let first = slot
            .replace(&mut map, LatLng::new(1.0, 1.0), Icon::user_location(), IconStyle::user_dot())
            .unwrap();
        let second = slot
            .replace(&mut map, LatLng::new(2.0, 2.0), Icon::user_location(), IconStyle::user_dot())
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(map.placemark_count(), 1);
        assert_eq!(map.marker_position(first), None);
        assert_eq!(slot.position(&map), Some(LatLng::new(2.0, 2.0)));
    }

    #[test]
    fn test_release_tolerates_missing_marker() {
        let mut map = ready_map();
        let mut slot = MarkerSlot::new();
        let handle = slot
            .replace(&mut map, LatLng::new(1.0, 1.0), Icon::user_location(), IconStyle::user_dot())
            .unwrap();
        map.remove_marker(handle).unwrap();

        assert!(slot.release(&mut map).is_ok());
        assert!(!slot.is_occupied());
        assert!(slot.release(&mut map).is_ok());
    }

    #[test]
    fn test_failed_placement_leaves_slot_empty() {
        let mut map = ready_map();
        let mut slot = MarkerSlot::new();
        slot.replace(&mut map, LatLng::new(1.0, 1.0), Icon::user_location(), IconStyle::user_dot())
            .unwrap();

        let err = slot
            .replace(&mut map, LatLng::new(100.0, 1.0), Icon::user_location(), IconStyle::user_dot())
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidCoordinates(_)));
        assert!(!slot.is_occupied());
        assert_eq!(map.placemark_count(), 0);
    }
}
