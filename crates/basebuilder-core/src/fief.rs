//! Background grid and fief overlay geometry.
//!
//! Everything here is in canvas space and purely cosmetic; drawing is left to
//! the host.

use crate::camera::Camera;
use kurbo::{Line, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Cells per side of the fief outline.
pub const FIEF_OUTLINE_CELLS: f64 = 5.0;
/// Cells per side of one advanced fief grid tile.
pub const FIEF_GRID_CELLS: f64 = 10.0;

/// Which overlay is drawn on top of the background grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FiefOverlay {
    #[default]
    Off,
    /// One 5×5 cell square around the view centre.
    Outline,
    /// Repeating 10×10 cell tiles across the view.
    AdvancedGrid,
}

impl FiefOverlay {
    /// Toggle the outline; turning it on turns the grid off.
    pub fn toggle_outline(self) -> Self {
        match self {
            FiefOverlay::Outline => FiefOverlay::Off,
            _ => FiefOverlay::Outline,
        }
    }

    /// Toggle the advanced grid; turning it on turns the outline off.
    pub fn toggle_advanced_grid(self) -> Self {
        match self {
            FiefOverlay::AdvancedGrid => FiefOverlay::Off,
            _ => FiefOverlay::AdvancedGrid,
        }
    }
}

/// Canvas-space lines of a regular grid with `spacing` covering `visible`.
fn lines_covering(visible: Rect, spacing: f64) -> Vec<Line> {
    let mut lines = Vec::new();
    if spacing <= 0.0 {
        return lines;
    }

    let mut x = (visible.x0 / spacing).floor() * spacing;
    while x <= visible.x1 {
        lines.push(Line::new((x, visible.y0), (x, visible.y1)));
        x += spacing;
    }
    let mut y = (visible.y0 / spacing).floor() * spacing;
    while y <= visible.y1 {
        lines.push(Line::new((visible.x0, y), (visible.x1, y)));
        y += spacing;
    }
    lines
}

/// Background grid lines for the visible part of the canvas.
pub fn grid_lines(camera: &Camera, viewport: Size, grid_size: f64) -> Vec<Line> {
    lines_covering(camera.visible_rect(viewport), grid_size)
}

/// The 5×5 fief square nearest the canvas point under the viewport centre.
pub fn fief_outline(camera: &Camera, viewport: Size, grid_size: f64) -> Rect {
    let center = camera.visible_rect(viewport).center();
    let size = FIEF_OUTLINE_CELLS * grid_size;
    let origin = Point::new(
        (center.x / grid_size).round() * grid_size - size / 2.0,
        (center.y / grid_size).round() * grid_size - size / 2.0,
    );
    Rect::from_origin_size(origin, (size, size))
}

/// Lines of the repeating 10×10 fief grid, anchored at multiples of the tile.
pub fn advanced_fief_lines(camera: &Camera, viewport: Size, grid_size: f64) -> Vec<Line> {
    lines_covering(camera.visible_rect(viewport), FIEF_GRID_CELLS * grid_size)
}
