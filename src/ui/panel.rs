use crate::{
    core::config::ButtonPanelConfig,
    screen::buttons::{ButtonPanel, MapButton},
    ui::style::ButtonStyle,
};
use egui::{Align2, Id, Pos2, Rect, Sense, Ui, Vec2};

/// Where the button stack sits inside the map
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    pub button_size: f32,
    pub spacing: f32,
    /// Gap between the stack and the container's right edge
    pub trailing_margin: f32,
    /// Shift of the stack's centre from the container's vertical centre
    pub center_y_offset: f32,
}

impl From<&ButtonPanelConfig> for StackLayout {
    fn from(config: &ButtonPanelConfig) -> Self {
        Self {
            button_size: config.button_size,
            spacing: config.spacing,
            trailing_margin: config.trailing_margin,
            center_y_offset: config.center_y_offset,
        }
    }
}

impl StackLayout {
    /// Rects of `count` square buttons stacked top to bottom, anchored to the
    /// trailing edge and centred vertically
    pub fn button_rects(&self, container: Rect, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }

        let size = Vec2::splat(self.button_size);
        let height = count as f32 * self.button_size + (count - 1) as f32 * self.spacing;
        let x = container.max.x - self.trailing_margin - self.button_size;
        let top = container.center().y + self.center_y_offset - height / 2.0;

        (0..count)
            .map(|i| {
                let y = top + i as f32 * (self.button_size + self.spacing);
                Rect::from_min_size(Pos2::new(x, y), size)
            })
            .collect()
    }
}

/// Draws the button stack over `container` and returns the tags tapped this frame
pub fn show_button_stack(
    ui: &mut Ui,
    container: Rect,
    panel: &ButtonPanel,
    layout: &StackLayout,
    style: &ButtonStyle,
) -> Vec<i32> {
    let rects = layout.button_rects(container, panel.len());
    let mut tapped = Vec::new();

    for (button, rect) in panel.buttons().iter().zip(rects) {
        let id = Id::new("pinmap_map_button").with(button.tag);
        let response = ui.interact(rect, id, Sense::click());

        let fill = if response.is_pointer_button_down_on() {
            style.pressed_color
        } else if response.hovered() {
            style.hover_color
        } else {
            style.background_color
        };
        paint_button(ui, rect, button, fill, style);

        if response.clicked() {
            tapped.push(button.tag);
        }
        response.on_hover_text(button.icon.name());
    }

    tapped
}

fn paint_button(ui: &Ui, rect: Rect, button: &MapButton, fill: egui::Color32, style: &ButtonStyle) {
    let painter = ui.painter();
    painter.rect_filled(rect, style.rounding, fill);
    painter.rect_stroke(rect, style.rounding, style.border_stroke);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        button.action.glyph(),
        style.glyph_font.clone(),
        style.glyph_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> StackLayout {
        StackLayout::from(&ButtonPanelConfig::default())
    }

    #[test]
    fn test_stack_is_trailing_and_centred() {
        let container = Rect::from_min_size(Pos2::ZERO, Vec2::new(390.0, 844.0));
        let rects = layout().button_rects(container, 3);

        assert_eq!(rects.len(), 3);
        for rect in &rects {
            assert_eq!(rect.size(), Vec2::splat(48.0));
            assert_eq!(rect.max.x, 390.0 - 16.0);
        }
        assert_eq!(rects[1].min.y - rects[0].max.y, 8.0);
        let middle = (rects[0].min.y + rects[2].max.y) / 2.0;
        assert!((middle - 422.0).abs() < 1e-3);
    }

    #[test]
    fn test_center_offset_shifts_stack() {
        let container = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(300.0, 600.0));
        let base = layout().button_rects(container, 2);
        let shifted = StackLayout {
            center_y_offset: -40.0,
            ..layout()
        }
        .button_rects(container, 2);

        assert_eq!(shifted[0].min.y, base[0].min.y - 40.0);
        assert_eq!(shifted[0].min.x, base[0].min.x);
    }

    #[test]
    fn test_empty_stack() {
        let container = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0));
        assert!(layout().button_rects(container, 0).is_empty());
    }
}
