//! Tile definitions and placed-shape geometry.

mod catalog;

pub use catalog::{ShapeDefinition, definition};

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// The three placeable tile types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    Square,
    Triangle,
    RightTriangle,
}

impl ShapeType {
    pub const ALL: [ShapeType; 3] = [
        ShapeType::Square,
        ShapeType::Triangle,
        ShapeType::RightTriangle,
    ];

    /// Get the static definition for this type.
    pub fn definition(self) -> &'static ShapeDefinition {
        definition(self)
    }

    /// Edge index of the hypotenuse, for right triangles.
    pub fn hypotenuse(self) -> Option<usize> {
        match self {
            ShapeType::RightTriangle => Some(1),
            _ => None,
        }
    }

    /// Check if `edge` is one of the two legs of a right triangle.
    pub fn is_leg(self, edge: usize) -> bool {
        self == ShapeType::RightTriangle && (edge == 0 || edge == 2)
    }
}

/// Map any angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// One tile instance on the canvas.
///
/// Identity is the index in the owning collection, which shifts on deletion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedShape {
    #[serde(rename = "type")]
    pub kind: ShapeType,
    /// World-space centre.
    pub x: f64,
    pub y: f64,
    /// Rotation in radians, kept in `[0, 2π)`.
    pub rotation: f64,
    /// Uniform scale, fixed at creation.
    pub size: f64,
}

impl PlacedShape {
    /// Create an unrotated shape centred on `center`.
    pub fn new(kind: ShapeType, center: Point, size: f64) -> Self {
        Self {
            kind,
            x: center.x,
            y: center.y,
            rotation: 0.0,
            size,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = normalize_angle(rotation);
        self
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_center(&mut self, center: Point) {
        self.x = center.x;
        self.y = center.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Add `angle` to the rotation, keeping it normalized.
    pub fn rotate_by(&mut self, angle: f64) {
        self.rotation = normalize_angle(self.rotation + angle);
    }

    /// Shape-local to world transform: scale, rotate, then translate.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.center().to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale(self.size)
    }

    /// World-space vertices in definition order.
    pub fn vertices(&self) -> Vec<Point> {
        let transform = self.transform();
        self.kind
            .definition()
            .vertices
            .iter()
            .map(|&v| transform * v)
            .collect()
    }

    /// World-space edges in definition order.
    ///
    /// Lengths come from the canonical side lengths, not from the vertex
    /// distance; the two agree because scale is uniform and rotation rigid.
    pub fn edges(&self) -> Vec<Edge> {
        let vertices = self.vertices();
        let sides = self.kind.definition().side_lengths;
        let n = vertices.len();
        (0..n)
            .map(|i| {
                let start = vertices[i];
                let end = vertices[(i + 1) % n];
                let direction = (end - start).normalize();
                Edge {
                    start,
                    end,
                    length: sides[i] * self.size,
                    direction,
                    normal: Vec2::new(direction.y, -direction.x),
                }
            })
            .collect()
    }

    /// Edge `index` in world space, if it exists.
    pub fn edge(&self, index: usize) -> Option<Edge> {
        self.edges().get(index).copied()
    }

    /// Ray-casting parity test against the transformed outline.
    ///
    /// Points exactly on the boundary may land either way.
    pub fn contains_point(&self, point: Point) -> bool {
        point_in_polygon(point, &self.vertices())
    }
}

/// A derived boundary segment of a placed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
    /// Canonical length times shape size.
    pub length: f64,
    /// Unit vector from start to end.
    pub direction: Vec2,
    /// Outward unit normal, `(dy, -dx)` of the direction.
    pub normal: Vec2,
}

impl Edge {
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Angle of the start-to-end direction.
    pub fn angle(&self) -> f64 {
        (self.end - self.start).atan2()
    }

    /// Angle of the end-to-start direction.
    pub fn reversed_angle(&self) -> f64 {
        (self.start - self.end).atan2()
    }
}

/// Standard even-odd ray casting test.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let mut inside = false;
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Mean of the shape centres, or `None` for an empty set.
pub fn centroid<'a>(shapes: impl IntoIterator<Item = &'a PlacedShape>) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for shape in shapes {
        sum += shape.center().to_vec2();
        count += 1;
    }
    (count > 0).then(|| (sum / count as f64).to_point())
}

/// Topmost shape containing `point`; later shapes are drawn on top.
pub fn shape_at(point: Point, shapes: &[PlacedShape]) -> Option<usize> {
    shapes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, shape)| shape.contains_point(point))
        .map(|(index, _)| index)
}
