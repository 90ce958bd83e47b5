use crate::{
    core::{camera::Animation, geo::LatLng},
    host::{Icon, MapHost},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// What a map button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonAction {
    ZoomIn,
    ZoomOut,
    /// Back to the user's last known position
    Recenter,
}

impl ButtonAction {
    pub const ALL: [ButtonAction; 3] = [
        ButtonAction::ZoomIn,
        ButtonAction::ZoomOut,
        ButtonAction::Recenter,
    ];

    /// Integer id the button is tagged with
    pub fn tag(self) -> i32 {
        match self {
            ButtonAction::ZoomIn => 0,
            ButtonAction::ZoomOut => 1,
            ButtonAction::Recenter => 2,
        }
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.tag() == tag)
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            ButtonAction::ZoomIn => "map_zoom_in",
            ButtonAction::ZoomOut => "map_zoom_out",
            ButtonAction::Recenter => "map_current_location",
        }
    }

    /// Glyph drawn when the icon image is unavailable
    pub fn glyph(self) -> &'static str {
        match self {
            ButtonAction::ZoomIn => "+",
            ButtonAction::ZoomOut => "−",
            ButtonAction::Recenter => "◎",
        }
    }
}

/// One tappable square in the panel
#[derive(Debug, Clone, PartialEq)]
pub struct MapButton {
    pub tag: i32,
    pub action: ButtonAction,
    pub icon: Icon,
}

/// The vertical stack of map buttons, top to bottom
#[derive(Debug, Clone, Default)]
pub struct ButtonPanel {
    buttons: Vec<MapButton>,
}

impl ButtonPanel {
    /// One button per action, tagged with the action's id
    pub fn new(actions: &[ButtonAction]) -> Self {
        let buttons = actions
            .iter()
            .map(|action| MapButton {
                tag: action.tag(),
                action: *action,
                icon: Icon::new(action.icon_name()),
            })
            .collect();
        Self { buttons }
    }

    pub fn buttons(&self) -> &[MapButton] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Action of the configured button carrying `tag`
    pub fn lookup(&self, tag: i32) -> Option<ButtonAction> {
        self.buttons
            .iter()
            .find(|button| button.tag == tag)
            .map(|button| button.action)
    }

    /// Runs the action tagged `tag` against the host's current camera.
    ///
    /// Recenter without a known user location does nothing.
    pub fn dispatch<H: MapHost + ?Sized>(
        &self,
        tag: i32,
        host: &mut H,
        user_location: Option<LatLng>,
        animation: Animation,
    ) -> Result<()> {
        let action = self
            .lookup(tag)
            .ok_or(MapError::UnrecognizedButtonTag(tag))?;
        log::debug!("map button {:?} tapped", action);

        let camera = host.camera();
        match action {
            ButtonAction::ZoomIn => host.move_camera(camera.with_zoom(camera.zoom + 1.0), animation),
            ButtonAction::ZoomOut => host.move_camera(camera.with_zoom(camera.zoom - 1.0), animation),
            ButtonAction::Recenter => match user_location {
                Some(target) => host.move_camera(camera.with_target(target), animation),
                None => {
                    log::info!("recenter ignored: no location fix yet");
                    Ok(())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{camera::CameraState, geo::Point, style::StyleSheet};
    use crate::host::MemoryMap;

    fn ready_map_at(camera: CameraState) -> MemoryMap {
        let mut map = MemoryMap::new(Point::new(400.0, 800.0)).with_camera(camera);
        map.attach(&StyleSheet::default()).unwrap();
        map
    }

    #[test]
    fn test_tags_round_trip() {
        for action in ButtonAction::ALL {
            assert_eq!(ButtonAction::from_tag(action.tag()), Some(action));
        }
        assert_eq!(ButtonAction::from_tag(99), None);
    }

    #[test]
    fn test_panel_builds_one_button_per_action() {
        let panel = ButtonPanel::new(&ButtonAction::ALL);
        assert_eq!(panel.len(), 3);
        assert_eq!(panel.buttons()[1].tag, 1);
        assert_eq!(panel.buttons()[1].icon, Icon::new("map_zoom_out"));
        assert_eq!(panel.lookup(2), Some(ButtonAction::Recenter));
    }

    #[test]
    fn test_lookup_only_knows_configured_buttons() {
        let panel = ButtonPanel::new(&[ButtonAction::ZoomIn]);
        assert_eq!(panel.lookup(0), Some(ButtonAction::ZoomIn));
        assert_eq!(panel.lookup(1), None);
    }

    #[test]
    fn test_zoom_buttons_change_zoom_by_one() {
        let start = CameraState::new(LatLng::new(59.96, 30.26), 12.0, 15.0, 10.0);
        let mut map = ready_map_at(start);
        let panel = ButtonPanel::new(&ButtonAction::ALL);

        panel
            .dispatch(ButtonAction::ZoomIn.tag(), &mut map, None, Animation::immediate())
            .unwrap();
        assert_eq!(map.camera(), start.with_zoom(13.0));

        panel
            .dispatch(ButtonAction::ZoomOut.tag(), &mut map, None, Animation::immediate())
            .unwrap();
        assert_eq!(map.camera(), start);
    }

    #[test]
    fn test_recenter_keeps_zoom_azimuth_tilt() {
        let start = CameraState::new(LatLng::new(0.0, 0.0), 9.0, 45.0, 20.0);
        let mut map = ready_map_at(start);
        let panel = ButtonPanel::new(&ButtonAction::ALL);
        let home = LatLng::new(59.961075, 30.260612);

        panel
            .dispatch(ButtonAction::Recenter.tag(), &mut map, Some(home), Animation::smooth(1.0))
            .unwrap();
        map.finish_animation();
        assert_eq!(map.camera(), start.with_target(home));
    }

    #[test]
    fn test_recenter_without_location_is_noop() {
        let start = CameraState::new(LatLng::new(1.0, 2.0), 9.0, 0.0, 0.0);
        let mut map = ready_map_at(start);
        let panel = ButtonPanel::new(&ButtonAction::ALL);

        panel
            .dispatch(ButtonAction::Recenter.tag(), &mut map, None, Animation::immediate())
            .unwrap();
        assert_eq!(map.camera(), start);
        assert!(map.take_events().is_empty());
    }

    #[test]
    fn test_unknown_tag_is_rejected_without_camera_change() {
        let start = CameraState::new(LatLng::new(1.0, 2.0), 9.0, 0.0, 0.0);
        let mut map = ready_map_at(start);
        let panel = ButtonPanel::new(&ButtonAction::ALL);

        let err = panel
            .dispatch(42, &mut map, None, Animation::immediate())
            .unwrap_err();
        assert!(matches!(err, MapError::UnrecognizedButtonTag(42)));
        assert_eq!(map.camera(), start);
    }
}
