use anyhow::Context as _;
use geo_types::line_string;
use pinmap::{
    prelude::*,
    ui::{ScreenView, UiMapExt},
};
use std::time::{Duration, Instant};

/// How often the scripted location service reports
const LOCATION_INTERVAL: Duration = Duration::from_secs(4);
/// Idle repaint rate, so queued location events are picked up
const IDLE_REPAINT: Duration = Duration::from_millis(100);

/// Standalone map screen demo
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ScreenConfig::from_file(&path)
            .with_context(|| format!("failed to load screen config from {}", path))?,
        None => ScreenConfig::default(),
    };

    let mut screen = MapScreen::new(MemoryMap::default(), config)?;
    screen.set_up().context("failed to set up the map screen")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([390.0, 844.0])
            .with_title("pinmap"),
        ..Default::default()
    };

    eframe::run_native(
        "pinmap-app",
        options,
        Box::new(move |_cc| Box::new(PinmapApp::new(screen))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {}", e))?;

    Ok(())
}

/// A short walk along the Neva embankment with one dropped fix
fn demo_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::Fix(LatLng::new(59.961075, 30.260612)),
        ScriptStep::Fix(LatLng::new(59.958420, 30.268970)),
        ScriptStep::Fix(LatLng::new(59.955210, 30.279840)),
        ScriptStep::Fail,
        ScriptStep::Fix(LatLng::new(59.951630, 30.290380)),
    ]
}

fn demo_route() -> Route {
    Route::new(line_string![
        (x: 30.260612, y: 59.961075),
        (x: 30.268970, y: 59.958420),
        (x: 30.279840, y: 59.955210),
        (x: 30.290380, y: 59.951630),
    ])
}

/// The main application struct
struct PinmapApp {
    screen: MapScreen<MemoryMap>,
    view: ScreenView,
    location: ScriptedLocationService,
    route: Route,
    last_frame: Option<Instant>,
}

impl PinmapApp {
    fn new(mut screen: MapScreen<MemoryMap>) -> Self {
        let mut location = ScriptedLocationService::new(demo_script(), LOCATION_INTERVAL).repeating();
        screen.bind_location_service(&mut location);
        screen.set_object_tap_listener(|handle, at| {
            log::info!("tapped {} at {:.5}, {:.5}", handle, at.lat, at.lng);
        });

        let route = demo_route();
        screen.on_routes(Ok(vec![route.clone()]));
        location.start();

        Self {
            view: ScreenView::new(&screen),
            screen,
            location,
            route,
            last_frame: None,
        }
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let camera = self.screen.host().camera();
            ui.label(format!("zoom {:.1}", camera.zoom));

            match self.screen.user_location() {
                Some(at) => ui.label(format!("you {:.5}, {:.5}", at.lat, at.lng)),
                None if self.location.is_running() => ui.label("waiting for location"),
                None => ui.label("location off"),
            };

            if ui.button("Frame route").clicked() {
                let geometry: geo_types::Geometry<f64> = self.route.geometry.clone().into();
                if let Err(e) = self.screen.frame_geometry(&geometry, None) {
                    log::warn!("failed to frame route: {}", e);
                }
            }
        });
    }
}

impl eframe::App for PinmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let delta = self
            .last_frame
            .replace(now)
            .map(|last| now - last)
            .unwrap_or_default();

        self.screen.pump();
        let animating = self.screen.advance(delta);

        egui::TopBottomPanel::top("status").show(ctx, |ui| self.status_bar(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| ui.map_screen(&mut self.view, &mut self.screen));

        if animating {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
