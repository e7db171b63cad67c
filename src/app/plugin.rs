//! Walkers plugins drawing the road segments and the query region on the map

use crate::data::{BoundingBox, Coordinate, Segment};
use egui::{Color32, Pos2, Rect, Stroke};
use std::sync::Arc;
use tokio::sync::RwLock;
use walkers::{Plugin, Projector};

/// How road lines are drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color32,
    /// Width in screen pixels
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color32::from_rgba_unmultiplied(255, 255, 0, 100),
            width: 5.0,
        }
    }
}

impl LineStyle {
    fn stroke(&self) -> Stroke {
        Stroke::new(self.width, self.color)
    }
}

/// Render statistics shared with the UI
#[derive(Default, Clone, Debug)]
pub struct RenderStats {
    pub segments_rendered: usize,
}

/// Plugin drawing the revealed prefix of the segment list
pub struct RoadLayer {
    segments: Arc<[Segment]>,
    visible: usize,
    style: LineStyle,
    render_stats: Arc<RwLock<RenderStats>>,
}

impl RoadLayer {
    /// Draw `segments[..visible]` with `style`
    pub fn new(
        segments: Arc<[Segment]>,
        visible: usize,
        style: LineStyle,
        render_stats: Arc<RwLock<RenderStats>>,
    ) -> Self {
        Self {
            visible: visible.min(segments.len()),
            segments,
            style,
            render_stats,
        }
    }
}

fn project(projector: &Projector, lat: f64, lon: f64) -> Pos2 {
    let screen = projector.project(walkers::lat_lon(lat, lon));
    Pos2::new(screen.x, screen.y)
}

impl Plugin for RoadLayer {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("RoadLayer::run");

        let painter = ui.painter();
        let viewport = response.rect.expand(self.style.width);
        let stroke = self.style.stroke();

        let mut rendered = 0;
        for segment in &self.segments[..self.visible] {
            let from = project(projector, segment.start.y, segment.start.x);
            let to = project(projector, segment.end.y, segment.end.x);

            if !viewport.intersects(Rect::from_two_pos(from, to)) {
                continue;
            }

            painter.line_segment([from, to], stroke);
            rendered += 1;
        }

        // Use try_write for non-blocking UI rendering.
        if let Ok(mut stats) = self.render_stats.try_write() {
            stats.segments_rendered = rendered;
        }
    }
}

/// Plugin outlining the padded query region with start and end markers
pub struct QueryBoundsLayer {
    bbox: BoundingBox,
    start: Coordinate,
    end: Coordinate,
}

impl QueryBoundsLayer {
    pub fn new(bbox: BoundingBox, start: Coordinate, end: Coordinate) -> Self {
        Self { bbox, start, end }
    }
}

impl Plugin for QueryBoundsLayer {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("QueryBoundsLayer::run");

        // NaN from lenient input has no place on screen
        if !self.bbox.is_finite() {
            return;
        }

        let painter = ui.painter();
        let corners = [
            project(projector, self.bbox.max_lat, self.bbox.min_lon),
            project(projector, self.bbox.max_lat, self.bbox.max_lon),
            project(projector, self.bbox.min_lat, self.bbox.max_lon),
            project(projector, self.bbox.min_lat, self.bbox.min_lon),
        ];
        painter.add(egui::Shape::closed_line(
            corners.to_vec(),
            Stroke::new(1.5, Color32::from_rgb(70, 130, 220)),
        ));

        for (coordinate, color) in [(self.start, Color32::GREEN), (self.end, Color32::RED)] {
            if coordinate.is_finite() {
                let center = project(projector, coordinate.lat, coordinate.lon);
                painter.circle_filled(center, 5.0, color);
                painter.circle_stroke(center, 5.0, Stroke::new(1.0, Color32::BLACK));
            }
        }
    }
}
