use crate::{
    core::geo::{LatLng, LatLngBounds, Point},
    host::{Icon, MapHost, MemoryMap},
    screen::MapScreen,
    ui::style::{icon_size, MapStyle},
};
use egui::{Align2, Color32, Painter, Pos2, Rect, Response, Sense, Shape, Ui, Vec2, Widget};

const SCROLL_ZOOM_PER_POINT: f64 = 0.002;
/// How far from a placemark, in points, a click still counts as a tap on it
const TAP_TOLERANCE: f64 = 24.0;
const MAX_GRID_LINES: i64 = 64;

/// Interactive map surface for a screen backed by [`MemoryMap`].
///
/// Drags pan, scrolling zooms and clicks are reported as object taps; the
/// resulting host events are dispatched before the widget returns.
pub struct MapCanvas<'a> {
    screen: &'a mut MapScreen<MemoryMap>,
    style: &'a MapStyle,
    size: Option<Vec2>,
    interactive: bool,
}

impl<'a> MapCanvas<'a> {
    pub fn new(screen: &'a mut MapScreen<MemoryMap>, style: &'a MapStyle) -> Self {
        Self {
            screen,
            style,
            size: None,
            interactive: true,
        }
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

impl Widget for MapCanvas<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, mut response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        let host = self.screen.host_mut();
        host.set_size(Point::new(rect.width() as f64, rect.height() as f64));

        if self.interactive {
            handle_input(ui, rect, &mut response, host);
            self.screen.dispatch_host_events();
        }

        let painter = ui.painter_at(rect);
        let host = self.screen.host();
        painter.rect_filled(rect, 0.0, self.style.background_color);
        paint_graticule(&painter, rect, host, self.style);
        paint_routes(&painter, rect, host, self.style);
        paint_placemarks(&painter, rect, host, self.style);

        response
    }
}

fn handle_input(ui: &Ui, rect: Rect, response: &mut Response, host: &mut MemoryMap) {
    if response.hovered() {
        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_delta.abs() > 0.1 {
            if let Err(e) = host.zoom_by(scroll_delta as f64 * SCROLL_ZOOM_PER_POINT) {
                log::warn!("scroll zoom ignored: {}", e);
            }
            response.mark_changed();
        }
    }

    if response.dragged() {
        let drag_delta = response.drag_delta();
        if drag_delta.length_sq() > 0.5 {
            if let Err(e) = host.pan_by_pixels(Point::new(drag_delta.x as f64, drag_delta.y as f64)) {
                log::warn!("pan ignored: {}", e);
            }
            response.mark_changed();
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let local = pos - rect.min;
            if let Some(handle) = host.tap(Point::new(local.x as f64, local.y as f64), TAP_TOLERANCE) {
                log::debug!("tapped {}", handle);
            }
        }
    }
}

fn to_pos(rect: Rect, point: Point) -> Pos2 {
    Pos2::new(rect.min.x + point.x as f32, rect.min.y + point.y as f32)
}

/// Geographic box covering the viewport, rotation included
fn visible_bounds(host: &MemoryMap) -> LatLngBounds {
    let size = host.size();
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(size.x, 0.0),
        Point::new(0.0, size.y),
        Point::new(size.x, size.y),
    ];
    let first = host.from_screen(corners[0]);
    let mut bounds = LatLngBounds::new(first, first);
    for corner in &corners[1..] {
        bounds.extend(&host.from_screen(*corner));
    }
    bounds
}

/// Grid spacing in degrees that keeps lines roughly half a tile apart
fn grid_step(zoom: f64) -> f64 {
    360.0 / 2f64.powi(zoom.floor() as i32 + 1)
}

fn grid_lines(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (min / step).ceil() as i64;
    let last = ((max / step).floor() as i64).min(first + MAX_GRID_LINES);
    (first..=last).map(move |i| i as f64 * step)
}

fn paint_graticule(painter: &Painter, rect: Rect, host: &MemoryMap, style: &MapStyle) {
    let camera = host.camera();
    let bounds = visible_bounds(host);
    let step = grid_step(camera.zoom);
    let (south, west) = (bounds.south_west.lat, bounds.south_west.lng);
    let (north, east) = (bounds.north_east.lat, bounds.north_east.lng);
    let decimals = (-step.log10()).ceil().max(0.0) as usize;

    for lng in grid_lines(west, east, step) {
        let from = to_pos(rect, host.to_screen(LatLng::new(south, lng)));
        let to = to_pos(rect, host.to_screen(LatLng::new(north, lng)));
        painter.line_segment([from, to], style.graticule_stroke);
    }

    for lat in grid_lines(south, north, step) {
        let from = to_pos(rect, host.to_screen(LatLng::new(lat, west)));
        let to = to_pos(rect, host.to_screen(LatLng::new(lat, east)));
        painter.line_segment([from, to], style.graticule_stroke);

        let label_at = to_pos(rect, host.to_screen(LatLng::new(lat, camera.target.lng)));
        painter.text(
            label_at + Vec2::new(4.0, -2.0),
            Align2::LEFT_BOTTOM,
            format!("{:.*}°", decimals, lat),
            style.label_font.clone(),
            style.label_color,
        );
    }
}

fn paint_routes(painter: &Painter, rect: Rect, host: &MemoryMap, style: &MapStyle) {
    for (_, line) in host.polylines() {
        let points: Vec<Pos2> = line
            .coords()
            .map(|coord| to_pos(rect, host.to_screen(LatLng::from(*coord))))
            .collect();
        painter.add(Shape::line(points.clone(), style.routes.casing));
        painter.add(Shape::line(points, style.routes.stroke));
    }
}

fn paint_placemarks(painter: &Painter, rect: Rect, host: &MemoryMap, style: &MapStyle) {
    let mut placemarks: Vec<_> = host
        .placemarks()
        .filter(|(_, placemark)| placemark.style.visible)
        .collect();
    // Lower z first, ties broken by placement order
    placemarks.sort_by(|a, b| {
        a.1.style
            .z_index
            .total_cmp(&b.1.style.z_index)
            .then(a.0.cmp(&b.0))
    });

    for (_, placemark) in placemarks {
        let size = icon_size(&placemark.icon, placemark.style.scale);
        let at = to_pos(rect, host.to_screen(placemark.position));
        let (ax, ay) = placemark.style.anchor;
        let icon_rect =
            Rect::from_min_size(at - Vec2::new(ax * size, ay * size), Vec2::splat(size));
        let color = style.marker_color(&placemark.icon);

        painter.circle_filled(icon_rect.center(), size / 2.0, color);
        painter.circle_stroke(icon_rect.center(), size / 2.0, style.markers.border_stroke);
        if placemark.icon == Icon::location_pin() {
            painter.circle_filled(icon_rect.center(), size / 6.0, Color32::WHITE);
        }
    }
}
