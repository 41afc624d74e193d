//! Static definitions of the placeable tile types.

use super::ShapeType;
use kurbo::Point;
use std::f64::consts::SQRT_2;

/// Unit-space outline of a tile type.
///
/// Vertices are shape-local, unrotated and unscaled, centred on the origin.
/// Edge `i` runs from vertex `i` to vertex `(i + 1) % n` and has canonical
/// length `side_lengths[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDefinition {
    pub vertices: &'static [Point],
    pub side_lengths: &'static [f64],
}

impl ShapeDefinition {
    /// Number of edges (equal to the number of vertices).
    pub fn edge_count(&self) -> usize {
        self.vertices.len()
    }
}

const SQUARE: ShapeDefinition = ShapeDefinition {
    vertices: &[
        Point::new(-0.5, -0.5),
        Point::new(0.5, -0.5),
        Point::new(0.5, 0.5),
        Point::new(-0.5, 0.5),
    ],
    side_lengths: &[1.0, 1.0, 1.0, 1.0],
};

// Height is √3/2, split 2:1 around the centroid.
const TRIANGLE: ShapeDefinition = ShapeDefinition {
    vertices: &[
        Point::new(0.0, -0.577_350_269_2),
        Point::new(0.5, 0.288_675_134_6),
        Point::new(-0.5, 0.288_675_134_6),
    ],
    side_lengths: &[1.0, 1.0, 1.0],
};

const RIGHT_TRIANGLE: ShapeDefinition = ShapeDefinition {
    vertices: &[
        Point::new(-0.5, -0.5),
        Point::new(0.5, -0.5),
        Point::new(-0.5, 0.5),
    ],
    side_lengths: &[1.0, SQRT_2, 1.0],
};

/// Look up the definition for a tile type.
pub fn definition(kind: ShapeType) -> &'static ShapeDefinition {
    match kind {
        ShapeType::Square => &SQUARE,
        ShapeType::Triangle => &TRIANGLE,
        ShapeType::RightTriangle => &RIGHT_TRIANGLE,
    }
}
