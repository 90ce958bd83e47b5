//! egui surface for a [`MapScreen`] backed by [`MemoryMap`]: the map canvas,
//! the trailing button stack and the alert modal.

pub mod alert;
pub mod panel;
pub mod style;
pub mod widget;

pub use alert::show_alert;
pub use panel::{show_button_stack, StackLayout};
pub use style::{ButtonStyle, MapStyle, MarkerStyle, RouteStyle};
pub use widget::MapCanvas;

use crate::{host::MemoryMap, screen::MapScreen};

/// Everything drawn for one screen
pub struct ScreenView {
    style: MapStyle,
    layout: StackLayout,
}

impl ScreenView {
    /// Palette and button layout taken from the screen's configuration
    pub fn new(screen: &MapScreen<MemoryMap>) -> Self {
        let config = screen.config();
        Self {
            style: MapStyle::from_sheet(&config.style),
            layout: StackLayout::from(&config.buttons),
        }
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    /// Draws the screen into `ui` and feeds taps back into it
    pub fn show(&mut self, ui: &mut egui::Ui, screen: &mut MapScreen<MemoryMap>) {
        let rect = ui.add(MapCanvas::new(screen, &self.style)).rect;

        for tag in show_button_stack(ui, rect, screen.buttons(), &self.layout, &self.style.buttons) {
            screen.tap(tag);
        }

        if let Some(alert) = screen.alert() {
            if show_alert(ui.ctx(), alert) {
                screen.dismiss_alert();
            }
        }
    }
}

pub trait UiMapExt {
    fn map_screen(&mut self, view: &mut ScreenView, screen: &mut MapScreen<MemoryMap>);
}

impl UiMapExt for egui::Ui {
    fn map_screen(&mut self, view: &mut ScreenView, screen: &mut MapScreen<MemoryMap>) {
        view.show(self, screen)
    }
}
