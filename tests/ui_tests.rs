#![cfg(feature = "egui")]

use egui::{Context, Pos2, RawInput, Rect, Vec2};
use geo_types::line_string;
use pinmap::{
    prelude::*,
    ui::{MapStyle, ScreenView, StackLayout, UiMapExt},
};

/// Headless frames of the screen view
#[cfg(test)]
mod ui_tests {
    use super::*;

    fn input(size: Vec2) -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, size)),
            ..Default::default()
        }
    }

    fn run_frame(ctx: &Context, view: &mut ScreenView, screen: &mut MapScreen<MemoryMap>) {
        let _ = ctx.run(input(Vec2::new(390.0, 844.0)), |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| ui.map_screen(view, screen));
        });
    }

    fn ready_screen() -> MapScreen<MemoryMap> {
        let mut screen = MapScreen::new(MemoryMap::default(), ScreenConfig::default()).unwrap();
        screen.set_up().unwrap();
        screen
    }

    #[test]
    fn test_canvas_sizes_host_to_viewport() {
        let ctx = Context::default();
        let mut screen = ready_screen();
        screen.host_mut().set_size(Point::new(10.0, 10.0));
        let mut view = ScreenView::new(&screen);

        run_frame(&ctx, &mut view, &mut screen);
        let size = screen.host().size();
        assert_eq!((size.x, size.y), (390.0, 844.0));
    }

    #[test]
    fn test_frames_with_markers_routes_and_alert() {
        let ctx = Context::default();
        let mut screen = ready_screen();
        let mut view = ScreenView::new(&screen);

        screen.on_location_update(LatLng::new(59.961075, 30.260612));
        screen.on_routes(Ok(vec![Route::new(geo_types::line_string![
            (x: 30.26, y: 59.96),
            (x: 30.28, y: 59.95),
        ])]));
        screen
            .main_sender()
            .send(MainEvent::ShowAlert(Alert::new("title", "message")))
            .unwrap();
        screen.pump();

        for _ in 0..3 {
            screen.advance(std::time::Duration::from_millis(400));
            run_frame(&ctx, &mut view, &mut screen);
        }

        // Nothing was clicked, so the alert stays up and the camera settled
        assert!(screen.alert().is_some());
        assert_eq!(screen.host().camera().target, LatLng::new(59.961075, 30.260612));
        assert_eq!(screen.host().placemark_count(), 2);
    }

    #[test]
    fn test_view_palette_follows_style_sheet() {
        let screen = ready_screen();
        let view = ScreenView::new(&screen);
        assert_eq!(
            view.style().background_color,
            MapStyle::from_sheet(&default_style_sheet()).background_color
        );
    }

    #[test]
    fn test_layout_follows_button_config() {
        let config = ScreenConfig::default();
        let layout = StackLayout::from(&config.buttons);
        let rects = layout.button_rects(Rect::from_min_size(Pos2::ZERO, Vec2::new(390.0, 844.0)), 3);
        assert!(rects.iter().all(|rect| rect.width() == config.buttons.button_size));
    }
}
