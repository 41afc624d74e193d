//! Camera module for pan/zoom transforms.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// Screen points are measured in the same space as `viewport_origin`
/// (typically window coordinates); canvas points live in the unbounded
/// world the shapes are placed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in viewport pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Top-left corner of the viewport in screen coordinates.
    pub viewport_origin: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.5,
            max_zoom: 3.0,
            viewport_origin: Point::ZERO,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with the given zoom limits.
    pub fn with_zoom_range(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            ..Self::default()
        }
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        let local = screen_point - self.viewport_origin.to_vec2() - self.offset;
        Point::new(local.x / self.zoom, local.y / self.zoom)
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        Point::new(canvas_point.x * self.zoom, canvas_point.y * self.zoom)
            + self.offset
            + self.viewport_origin.to_vec2()
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom level, keeping the canvas point under `focal` fixed.
    ///
    /// `focal` is in viewport coordinates. Returns false when the clamped
    /// zoom equals the current one.
    pub fn zoom_at(&mut self, focal: Point, zoom: f64) -> bool {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        let focal = focal.to_vec2();
        self.offset = focal - (focal - self.offset) * (new_zoom / self.zoom);
        self.zoom = new_zoom;
        true
    }

    /// Change the zoom additively about the centre of a viewport.
    pub fn zoom_by(&mut self, delta: f64, viewport: Size) -> bool {
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.zoom_at(center, self.zoom + delta)
    }

    /// Canvas-space rectangle currently visible in a viewport.
    pub fn visible_rect(&self, viewport: Size) -> Rect {
        let start = Point::new(-self.offset.x / self.zoom, -self.offset.y / self.zoom);
        let end = Point::new(
            (viewport.width - self.offset.x) / self.zoom,
            (viewport.height - self.offset.y) / self.zoom,
        );
        Rect::from_points(start, end)
    }
}
