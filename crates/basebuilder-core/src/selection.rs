//! Selection state: a set of shape indices with an optional primary.

use crate::groups::GroupSet;
use crate::shapes::PlacedShape;
use kurbo::{Point, Rect};
use std::collections::BTreeSet;

/// Rubber-band rectangle being dragged out on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub start: Point,
    pub current: Point,
}

impl SelectionRect {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, point: Point) {
        self.current = point;
    }

    /// Normalized rectangle covering both corners.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}

/// Currently selected shapes.
///
/// When non-empty, `primary` is always a member of the selected set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    primary: Option<usize>,
    selected: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<usize> {
        self.primary
    }

    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.primary = None;
    }

    /// Replace the selection with a single shape.
    pub fn select_only(&mut self, index: usize) {
        self.selected.clear();
        self.selected.insert(index);
        self.primary = Some(index);
    }

    /// Replace the selection with `indices`; the lowest becomes primary.
    pub fn select_many(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selected = indices.into_iter().collect();
        self.primary = self.selected.first().copied();
    }

    /// Click-to-select behaviour.
    ///
    /// A grouped shape selects its whole group unless `extend` is held.
    /// Otherwise an unselected shape replaces the selection (or joins it when
    /// extending) and a selected shape is removed when extending.
    pub fn toggle(&mut self, index: usize, extend: bool, groups: &GroupSet) {
        if !extend {
            if let Some(group) = groups.group_of(index) {
                self.selected = group.as_set().clone();
                self.primary = Some(index);
                return;
            }
        }

        if !self.selected.contains(&index) {
            if !extend {
                self.selected.clear();
            }
            self.selected.insert(index);
            self.primary = Some(index);
        } else if extend {
            self.selected.remove(&index);
            if self.primary == Some(index) {
                self.primary = self.selected.first().copied();
            }
        }
    }

    /// Start a rubber-band selection; clears unless extending.
    pub fn begin_box(&mut self, extend: bool) {
        if !extend {
            self.clear();
        }
    }

    /// Add every shape whose centre lies inside `rect`, boundary included.
    pub fn finish_box(&mut self, rect: Rect, shapes: &[PlacedShape]) {
        let rect = rect.abs();
        for (index, shape) in shapes.iter().enumerate() {
            let c = shape.center();
            if c.x >= rect.x0 && c.x <= rect.x1 && c.y >= rect.y0 && c.y <= rect.y1 {
                self.selected.insert(index);
            }
        }
        self.primary = self.selected.first().copied();
    }

    /// Rubber-band selection in one step.
    pub fn box_select(&mut self, rect: Rect, extend: bool, shapes: &[PlacedShape]) {
        self.begin_box(extend);
        self.finish_box(rect, shapes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Group;
    use crate::shapes::ShapeType;

    fn row(n: usize) -> Vec<PlacedShape> {
        (0..n)
            .map(|i| PlacedShape::new(ShapeType::Square, Point::new(i as f64 * 50.0, 0.0), 40.0))
            .collect()
    }

    #[test]
    fn test_toggle_replaces_and_extends() {
        let groups = GroupSet::new();
        let mut sel = Selection::new();
        sel.toggle(1, false, &groups);
        assert_eq!(sel.primary(), Some(1));
        sel.toggle(3, false, &groups);
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(3));

        sel.toggle(0, true, &groups);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.primary(), Some(0));
    }

    #[test]
    fn test_extend_removes_selected() {
        let groups = GroupSet::new();
        let mut sel = Selection::new();
        sel.select_many([2, 5]);
        sel.toggle(2, true, &groups);
        assert!(!sel.contains(2));
        assert_eq!(sel.primary(), Some(5));

        sel.toggle(5, true, &groups);
        assert!(sel.is_empty());
        assert_eq!(sel.primary(), None);
    }

    #[test]
    fn test_clicking_selected_without_extend_keeps_selection() {
        let groups = GroupSet::new();
        let mut sel = Selection::new();
        sel.select_many([1, 2]);
        sel.toggle(2, false, &groups);
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_toggle_selects_whole_group() {
        let mut groups = GroupSet::new();
        groups.push(Group::new([1, 4]));
        let mut sel = Selection::new();
        sel.toggle(4, false, &groups);
        assert_eq!(sel.indices().iter().copied().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(sel.primary(), Some(4));

        // Extending addresses the individual shape.
        sel.toggle(4, true, &groups);
        assert_eq!(sel.indices().iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_box_select_inclusive() {
        let shapes = row(4);
        let mut sel = Selection::new();
        sel.box_select(Rect::new(50.0, 0.0, 100.0, 0.0), false, &shapes);
        assert_eq!(sel.indices().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(sel.primary(), Some(1));
    }

    #[test]
    fn test_box_select_extend_and_reverse_drag() {
        let shapes = row(4);
        let mut sel = Selection::new();
        sel.select_only(0);
        let rect = SelectionRect {
            start: Point::new(170.0, 10.0),
            current: Point::new(140.0, -10.0),
        };
        sel.box_select(rect.to_rect(), true, &shapes);
        assert_eq!(sel.indices().iter().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(sel.primary(), Some(0));
    }

    #[test]
    fn test_empty_box_clears() {
        let shapes = row(2);
        let mut sel = Selection::new();
        sel.select_only(1);
        sel.box_select(Rect::new(500.0, 500.0, 600.0, 600.0), false, &shapes);
        assert!(sel.is_empty());
        assert_eq!(sel.primary(), None);
    }
}
