use crate::screen::Alert;
use egui::{Align2, Context, RichText, Window};

/// Shows `alert` as a centred modal. Returns true once the user dismissed it.
pub fn show_alert(ctx: &Context, alert: &Alert) -> bool {
    let mut dismissed = false;

    Window::new(RichText::new(&alert.title).strong())
        .id(egui::Id::new("pinmap_alert"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(alert.message.as_str());
                ui.add_space(8.0);
                if ui.button(alert.dismiss_title()).clicked() {
                    dismissed = true;
                }
            });
        });

    dismissed
}
