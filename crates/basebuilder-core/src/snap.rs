//! Snap functionality: grid-cell placement and edge-to-edge alignment.
//!
//! Edge snapping runs after a single shape was translated or rotated. It scans
//! the edges of every other shape in collection order and applies the first
//! compatible candidate: a rotation correction that makes the two edges
//! parallel or perpendicular, followed by a translation that brings the edge
//! midpoints together. At most one snap is applied per call.

use crate::config::SnapSettings;
use crate::shapes::{Edge, PlacedShape, ShapeType};
use kurbo::{Point, Vec2};
use std::f64::consts::{FRAC_PI_2, PI, SQRT_2, TAU};

/// Snap a point to the centre of the grid cell containing it.
pub fn snap_to_cell(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).floor() * grid_size + grid_size / 2.0,
        (point.y / grid_size).floor() * grid_size + grid_size / 2.0,
    )
}

/// How two snapped edges relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Edges run along each other, with a small outward seam.
    Parallel,
    /// Edges meet at a right angle, with a small outward seam.
    Perpendicular,
    /// Two equilateral triangles facing opposite ways: exact contact, no seam.
    Flush,
}

/// Record of an applied edge snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSnap {
    /// Index of the shape that was snapped to.
    pub target: usize,
    /// Edge index on the moved shape.
    pub edge: usize,
    /// Edge index on the target shape.
    pub target_edge: usize,
    pub alignment: Alignment,
    /// Rotation added to the moved shape, before normalization.
    pub rotation: f64,
    /// Translation applied after the rotation.
    pub translation: Vec2,
}

/// Check whether two edge lengths can meet: equal, or one is √2 times the
/// other (right-triangle hypotenuse against a unit edge).
pub fn lengths_compatible(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
        || (a - SQRT_2 * b).abs() < tolerance
        || (b - SQRT_2 * a).abs() < tolerance
}

/// Whether an edge pair should meet at a right angle rather than run parallel.
///
/// A right triangle's hypotenuse always meets perpendicular, as does a
/// right-triangle leg against a square.
pub fn should_be_perpendicular(
    kind_a: ShapeType,
    edge_a: usize,
    kind_b: ShapeType,
    edge_b: usize,
) -> bool {
    if kind_a.hypotenuse() == Some(edge_a) || kind_b.hypotenuse() == Some(edge_b) {
        return true;
    }
    (kind_a == ShapeType::Square && kind_b.is_leg(edge_b))
        || (kind_b == ShapeType::Square && kind_a.is_leg(edge_a))
}

/// Candidate edge pair that passed the distance test.
struct Candidate {
    edge: Edge,
    target_edge: Edge,
    /// Direction angle of the moved edge.
    angle: f64,
    /// Reversed direction angle of the target edge.
    target_angle: f64,
}

/// First accepted edge pair, before it is applied.
struct Match {
    target: usize,
    edge: usize,
    target_edge: usize,
    candidate: Candidate,
    alignment: Alignment,
    rotation: f64,
}

/// Try to snap `shapes[index]` to an edge of another shape.
///
/// Returns the applied snap, or `None` when the shape stays where it is.
pub fn snap_shape(
    shapes: &mut [PlacedShape],
    index: usize,
    grid_size: f64,
    settings: &SnapSettings,
) -> Option<EdgeSnap> {
    let found = find_match(shapes, index, grid_size, settings)?;
    let shape = shapes.get_mut(index)?;
    let snap = apply(shape, &found, grid_size * settings.outward_offset_ratio);
    log::debug!(
        "Snapped shape {} edge {} to shape {} edge {} ({:?})",
        index,
        snap.edge,
        snap.target,
        snap.target_edge,
        snap.alignment
    );
    Some(snap)
}

fn find_match(
    shapes: &[PlacedShape],
    index: usize,
    grid_size: f64,
    settings: &SnapSettings,
) -> Option<Match> {
    let shape = shapes.get(index)?;
    let edges = shape.edges();
    let threshold = grid_size * settings.distance_ratio;

    for (target, other) in shapes.iter().enumerate() {
        if target == index {
            continue;
        }
        let target_edges = other.edges();

        for (s, edge) in edges.iter().enumerate() {
            for (t, target_edge) in target_edges.iter().enumerate() {
                if !lengths_compatible(edge.length, target_edge.length, settings.length_tolerance) {
                    continue;
                }
                if edge.midpoint().distance(target_edge.midpoint()) >= threshold {
                    continue;
                }

                let candidate = Candidate {
                    edge: *edge,
                    target_edge: *target_edge,
                    angle: edge.angle(),
                    target_angle: target_edge.reversed_angle(),
                };
                if let Some((alignment, rotation)) =
                    classify(shape, s, other, t, &candidate, settings)
                {
                    return Some(Match {
                        target,
                        edge: s,
                        target_edge: t,
                        candidate,
                        alignment,
                        rotation,
                    });
                }
            }
        }
    }
    None
}

/// Decide the alignment for a candidate and the rotation that achieves it.
///
/// Returns `None` when the current angle is too far from the required one.
fn classify(
    shape: &PlacedShape,
    edge: usize,
    other: &PlacedShape,
    target_edge: usize,
    candidate: &Candidate,
    settings: &SnapSettings,
) -> Option<(Alignment, f64)> {
    let a1 = candidate.angle;
    let a2 = candidate.target_angle;
    let raw_diff = (a1 - a2).abs();

    let (lo, hi) = settings.hexagon_window;
    let flush = shape.kind == ShapeType::Triangle
        && other.kind == ShapeType::Triangle
        && raw_diff > PI * lo
        && raw_diff < PI * hi;

    let perpendicular =
        !flush && should_be_perpendicular(shape.kind, edge, other.kind, target_edge);

    // Fold the difference into [0, π/2]: 0 is parallel, π/2 perpendicular.
    let mut current = raw_diff % PI;
    if current > FRAC_PI_2 {
        current = PI - current;
    }
    let target = if perpendicular { FRAC_PI_2 } else { 0.0 };
    if (current - target).abs() >= settings.angle_tolerance {
        return None;
    }

    let tolerance = settings.angle_tolerance;
    // Branch order is significant when windows overlap: first match wins.
    let rotation = if perpendicular {
        let diff = (a1 - a2 + TAU) % PI;
        if (diff - FRAC_PI_2).abs() < tolerance {
            FRAC_PI_2 - diff
        } else if (diff - 3.0 * FRAC_PI_2).abs() < tolerance || (diff + FRAC_PI_2).abs() < tolerance
        {
            -FRAC_PI_2 - diff
        } else if (a1 - (a2 + FRAC_PI_2)).abs() < (a1 - (a2 - FRAC_PI_2)).abs() {
            a2 + FRAC_PI_2 - a1
        } else {
            a2 - FRAC_PI_2 - a1
        }
    } else {
        let diff = raw_diff % PI;
        if flush {
            a2 + PI - a1
        } else if diff < tolerance {
            a2 - a1
        } else if (diff - PI).abs() < tolerance {
            a2 + PI - a1
        } else if raw_diff < (a1 - (a2 + PI)).abs() {
            a2 - a1
        } else {
            a2 + PI - a1
        }
    };

    let alignment = if flush {
        Alignment::Flush
    } else if perpendicular {
        Alignment::Perpendicular
    } else {
        Alignment::Parallel
    };
    Some((alignment, rotation))
}

fn apply(shape: &mut PlacedShape, found: &Match, outward_offset: f64) -> EdgeSnap {
    shape.rotate_by(found.rotation);

    let target_edge = found.candidate.target_edge;
    let rotated = shape.edge(found.edge).unwrap_or(found.candidate.edge);
    let mut translation = target_edge.midpoint() - rotated.midpoint();
    if found.alignment != Alignment::Flush {
        translation += (rotated.normal + target_edge.normal) * outward_offset;
    }
    shape.translate(translation);

    EdgeSnap {
        target: found.target,
        edge: found.edge,
        target_edge: found.target_edge,
        alignment: found.alignment,
        rotation: found.rotation,
        translation,
    }
}
