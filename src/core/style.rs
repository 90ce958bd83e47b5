//! Map style sheets.
//!
//! A style sheet is a JSON array of rules, each selecting a group of map
//! elements and adjusting how they are drawn:
//!
//! ```json
//! [{ "elements": "geometry.fill", "stylers": { "saturation": -0.95, "lightness": 0.55 } }]
//! ```

use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Grayscale theme applied to the screen's map at set-up
pub const DEFAULT_STYLE_JSON: &str = r#"[
    { "elements": "geometry.fill.pattern", "stylers": { "saturation": -0.75 } },
    { "elements": "geometry.outline", "stylers": { "saturation": -0.75 } },
    { "elements": "geometry.fill", "stylers": { "saturation": -0.95, "lightness": 0.55 } },
    { "elements": "label.text.fill", "stylers": { "saturation": -0.75 } },
    { "elements": "label.icon", "stylers": { "saturation": -0.75 } }
]"#;

/// Adjustments applied to the elements a rule selects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stylers {
    /// -1.0 removes all colour, 1.0 doubles it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f32>,
    /// -1.0 pushes towards black, 1.0 towards white
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lightness: Option<f32>,
    /// Hex colour whose hue replaces the element's hue, keeping its
    /// saturation and lightness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<String>,
    /// Hex colour replacing the element's base colour, e.g. `"#aabbcc"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Stylers {
    /// Applies the adjustments to an RGB colour
    pub fn apply(&self, rgb: [u8; 3]) -> [u8; 3] {
        let base = self
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(rgb);
        let mut channels = base.map(|c| c as f32 / 255.0);

        if let Some(target) = self.hue.as_deref().and_then(parse_hex_color) {
            let (hue, _, _) = rgb_to_hsl(target.map(|c| c as f32 / 255.0));
            let (_, saturation, lightness) = rgb_to_hsl(channels);
            channels = hsl_to_rgb(hue, saturation, lightness);
        }

        if let Some(saturation) = self.saturation {
            let luma = 0.299 * channels[0] + 0.587 * channels[1] + 0.114 * channels[2];
            let factor = 1.0 + saturation.clamp(-1.0, 1.0);
            for c in channels.iter_mut() {
                *c = luma + (*c - luma) * factor;
            }
        }

        if let Some(lightness) = self.lightness {
            let lightness = lightness.clamp(-1.0, 1.0);
            for c in channels.iter_mut() {
                *c = if lightness >= 0.0 {
                    *c + (1.0 - *c) * lightness
                } else {
                    *c * (1.0 + lightness)
                };
            }
        }

        channels.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// One selector plus its adjustments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub elements: String,
    pub stylers: Stylers,
}

impl StyleRule {
    /// A rule for `geometry.fill` also covers `geometry.fill.pattern`
    pub fn matches(&self, element: &str) -> bool {
        element == self.elements
            || element
                .strip_prefix(self.elements.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// Ordered list of style rules; later rules win
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }

    /// Parses a JSON style sheet
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(MapError::Style)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(MapError::Style)
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Colour of `element` after every matching rule has been applied in order
    pub fn resolve(&self, element: &str, base: [u8; 3]) -> [u8; 3] {
        self.rules
            .iter()
            .filter(|rule| rule.matches(element))
            .fold(base, |rgb, rule| rule.stylers.apply(rgb))
    }
}

impl Default for StyleRule {
    fn default() -> Self {
        Self {
            elements: "all".to_string(),
            stylers: Stylers::default(),
        }
    }
}

/// The grayscale theme the screen applies when the config names no other
pub fn default_style_sheet() -> StyleSheet {
    // The literal is checked by tests; an empty sheet is the safe fallback.
    StyleSheet::parse(DEFAULT_STYLE_JSON).unwrap_or_default()
}

fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Hue in degrees, saturation and lightness in 0..=1
fn rgb_to_hsl([r, g, b]: [f32; 3]) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    let delta = max - min;
    if delta == 0.0 {
        return (0.0, 0.0, lightness);
    }

    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
    let hue = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (hue, saturation, lightness)
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_parses() {
        let sheet = StyleSheet::parse(DEFAULT_STYLE_JSON).unwrap();
        assert_eq!(sheet.rules().len(), 5);
        assert_eq!(sheet.rules()[2].elements, "geometry.fill");
        assert_eq!(sheet.rules()[2].stylers.lightness, Some(0.55));
        assert_eq!(sheet, default_style_sheet());
    }

    #[test]
    fn test_malformed_sheet_is_style_error() {
        let err = StyleSheet::parse("[{ \"elements\": 3 }").unwrap_err();
        assert!(matches!(err, MapError::Style(_)));
    }

    #[test]
    fn test_rule_prefix_matching() {
        let rule = StyleRule {
            elements: "geometry.fill".to_string(),
            stylers: Stylers::default(),
        };
        assert!(rule.matches("geometry.fill"));
        assert!(rule.matches("geometry.fill.pattern"));
        assert!(!rule.matches("geometry.fillet"));
        assert!(!rule.matches("geometry"));
    }

    #[test]
    fn test_full_desaturation_is_gray() {
        let stylers = Stylers {
            saturation: Some(-1.0),
            ..Default::default()
        };
        let [r, g, b] = stylers.apply([200, 40, 40]);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_lightness_and_color_override() {
        let white = Stylers {
            lightness: Some(1.0),
            ..Default::default()
        };
        assert_eq!(white.apply([10, 20, 30]), [255, 255, 255]);

        let recolor = Stylers {
            color: Some("#102030".to_string()),
            ..Default::default()
        };
        assert_eq!(recolor.apply([0, 0, 0]), [0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_resolve_applies_rules_in_order() {
        let sheet = default_style_sheet();
        // geometry.fill: desaturated then lightened
        let fill = sheet.resolve("geometry.fill", [120, 180, 90]);
        assert!(fill.iter().all(|c| *c > 150));
        // An element no rule touches keeps its colour
        assert_eq!(sheet.resolve("water", [1, 2, 3]), [1, 2, 3]);
    }

    #[test]
    fn test_hue_survives_parse_and_serialize() {
        let json = r##"[{ "elements": "geometry.fill", "stylers": { "hue": "#ff0000" } }]"##;
        let sheet = StyleSheet::parse(json).unwrap();
        assert_eq!(sheet.rules()[0].stylers.hue.as_deref(), Some("#ff0000"));

        let reparsed = StyleSheet::parse(&sheet.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, sheet);
        assert!(sheet.to_json().unwrap().contains("\"hue\""));
    }

    #[test]
    fn test_hue_rotates_keeping_lightness() {
        let red = Stylers {
            hue: Some("#ff0000".to_string()),
            ..Default::default()
        };
        // Pure blue takes red's hue at the same saturation and lightness
        assert_eq!(red.apply([0, 0, 255]), [255, 0, 0]);
        // Grays have no saturation to carry a hue
        assert_eq!(red.apply([90, 90, 90]), [90, 90, 90]);
    }
}
