use crate::{core::style::StyleSheet, host::Icon};
use egui::{Color32, FontId, Stroke};

/// Base colours before the style sheet is applied
const LAND_RGB: [u8; 3] = [236, 230, 214];
const OUTLINE_RGB: [u8; 3] = [186, 176, 160];
const LABEL_RGB: [u8; 3] = [92, 84, 70];

/// Nominal icon edge length in pixels, before the icon style's scale
const USER_LOCATION_ICON_SIZE: f32 = 160.0;
const LOCATION_PIN_ICON_SIZE: f32 = 36.0;
const FALLBACK_ICON_SIZE: f32 = 24.0;

/// Style configuration for the map canvas
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Fill drawn under everything
    pub background_color: Color32,
    /// Latitude / longitude grid
    pub graticule_stroke: Stroke,
    /// Coordinate labels
    pub label_color: Color32,
    pub label_font: FontId,
    pub routes: RouteStyle,
    pub markers: MarkerStyle,
    pub buttons: ButtonStyle,
}

/// Style for drawn routes
#[derive(Debug, Clone)]
pub struct RouteStyle {
    pub stroke: Stroke,
    pub casing: Stroke,
}

/// Style for placemarks
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub user_dot_color: Color32,
    pub pin_color: Color32,
    /// Any icon the canvas has no drawing for
    pub default_color: Color32,
    pub border_stroke: Stroke,
}

/// Style for the map buttons
#[derive(Debug, Clone)]
pub struct ButtonStyle {
    /// Background color for buttons
    pub background_color: Color32,
    /// Background color when hovered
    pub hover_color: Color32,
    /// Background color when pressed
    pub pressed_color: Color32,
    pub glyph_color: Color32,
    pub glyph_font: FontId,
    pub border_stroke: Stroke,
    /// Corner rounding
    pub rounding: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: rgb(LAND_RGB),
            graticule_stroke: Stroke::new(1.0, rgb(OUTLINE_RGB)),
            label_color: rgb(LABEL_RGB),
            label_font: FontId::proportional(11.0),
            routes: RouteStyle::default(),
            markers: MarkerStyle::default(),
            buttons: ButtonStyle::default(),
        }
    }
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            stroke: Stroke::new(4.0, Color32::from_rgb(44, 120, 230)),
            casing: Stroke::new(7.0, Color32::from_rgba_unmultiplied(255, 255, 255, 200)),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            user_dot_color: Color32::from_rgb(30, 136, 229),
            pin_color: Color32::from_rgb(229, 57, 53),
            default_color: Color32::DARK_GRAY,
            border_stroke: Stroke::new(2.0, Color32::WHITE),
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            hover_color: Color32::from_gray(235),
            pressed_color: Color32::from_gray(210),
            glyph_color: Color32::from_gray(40),
            glyph_font: FontId::proportional(22.0),
            border_stroke: Stroke::new(1.0, Color32::from_gray(190)),
            rounding: 8.0,
        }
    }
}

impl MapStyle {
    /// Canvas colours with the sheet's rules applied to the base palette.
    /// Overlays (routes, markers, buttons) are not styled by the sheet.
    pub fn from_sheet(sheet: &StyleSheet) -> Self {
        let defaults = Self::default();
        Self {
            background_color: rgb(sheet.resolve("geometry.fill", LAND_RGB)),
            graticule_stroke: Stroke::new(
                defaults.graticule_stroke.width,
                rgb(sheet.resolve("geometry.outline", OUTLINE_RGB)),
            ),
            label_color: rgb(sheet.resolve("label.text.fill", LABEL_RGB)),
            ..defaults
        }
    }

    pub fn marker_color(&self, icon: &Icon) -> Color32 {
        if *icon == Icon::user_location() {
            self.markers.user_dot_color
        } else if *icon == Icon::location_pin() {
            self.markers.pin_color
        } else {
            self.markers.default_color
        }
    }
}

/// On-screen edge length of `icon` drawn at `scale`
pub fn icon_size(icon: &Icon, scale: f32) -> f32 {
    let nominal = if *icon == Icon::user_location() {
        USER_LOCATION_ICON_SIZE
    } else if *icon == Icon::location_pin() {
        LOCATION_PIN_ICON_SIZE
    } else {
        FALLBACK_ICON_SIZE
    };
    nominal * scale
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::default_style_sheet;

    #[test]
    fn test_empty_sheet_keeps_base_palette() {
        let style = MapStyle::from_sheet(&StyleSheet::default());
        assert_eq!(style.background_color, rgb(LAND_RGB));
        assert_eq!(style.label_color, rgb(LABEL_RGB));
    }

    #[test]
    fn test_default_sheet_greys_out_land() {
        let style = MapStyle::from_sheet(&default_style_sheet());
        let [r, g, b, _] = style.background_color.to_array();
        let spread = r.max(g).max(b) - r.min(g).min(b);
        assert!(spread < 10, "land should be nearly grey, got {:?}", (r, g, b));
        assert_ne!(style.background_color, rgb(LAND_RGB));
    }

    #[test]
    fn test_icon_sizes() {
        assert_eq!(icon_size(&Icon::user_location(), 0.1), 16.0);
        assert_eq!(icon_size(&Icon::location_pin(), 1.0), LOCATION_PIN_ICON_SIZE);
        assert_eq!(icon_size(&Icon::new("other"), 2.0), 48.0);
    }
}
