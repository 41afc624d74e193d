//! Shape grouping.
//!
//! Groups are sets of shape indices that select and move together. Groups
//! never overlap and always hold at least two members.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of shape indices that act as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Group(BTreeSet<usize>);

impl Group {
    pub fn new(members: impl IntoIterator<Item = usize>) -> Self {
        Self(members.into_iter().collect())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn as_set(&self) -> &BTreeSet<usize> {
        &self.0
    }
}

/// Outcome of a group/ungroup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupChange {
    Grouped,
    Ungrouped,
    Unchanged,
}

/// All groups in a layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupSet(Vec<Group>);

impl GroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The group containing `index`, if any.
    pub fn group_of(&self, index: usize) -> Option<&Group> {
        self.0.iter().find(|group| group.contains(index))
    }

    /// Add a group. Groups with fewer than two members are ignored.
    pub fn push(&mut self, group: Group) {
        if group.len() >= 2 {
            self.0.push(group);
        }
    }

    /// Drop `indices` from every group and shift higher members down so they
    /// keep pointing at the same shapes after removal from the collection.
    pub fn remove_indices(&mut self, indices: &BTreeSet<usize>) {
        for &removed in indices.iter().rev() {
            for group in &mut self.0 {
                group.0 = group
                    .0
                    .iter()
                    .filter(|&&member| member != removed)
                    .map(|&member| if member > removed { member - 1 } else { member })
                    .collect();
            }
        }
        self.prune();
    }

    /// Toggle grouping for a selection.
    ///
    /// A selection that exactly matches an existing group dissolves it.
    /// Otherwise the indices leave any group they were in and form a new one.
    pub fn group_or_ungroup(&mut self, indices: &BTreeSet<usize>) -> GroupChange {
        if indices.len() <= 1 {
            return GroupChange::Unchanged;
        }

        if let Some(pos) = self.0.iter().position(|group| group.as_set() == indices) {
            self.0.remove(pos);
            return GroupChange::Ungrouped;
        }

        for group in &mut self.0 {
            group.0.retain(|member| !indices.contains(member));
        }
        self.prune();
        self.0.push(Group(indices.clone()));
        GroupChange::Grouped
    }

    fn prune(&mut self) {
        self.0.retain(|group| group.len() >= 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_push_ignores_singletons() {
        let mut groups = GroupSet::new();
        groups.push(Group::new([3]));
        assert!(groups.is_empty());
        groups.push(Group::new([1, 2]));
        assert_eq!(groups.len(), 1);
        assert!(groups.group_of(2).is_some());
        assert!(groups.group_of(0).is_none());
    }

    #[test]
    fn test_group_then_ungroup() {
        let mut groups = GroupSet::new();
        assert_eq!(groups.group_or_ungroup(&set(&[0, 2])), GroupChange::Grouped);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.group_or_ungroup(&set(&[0, 2])), GroupChange::Ungrouped);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_single_selection_is_unchanged() {
        let mut groups = GroupSet::new();
        assert_eq!(groups.group_or_ungroup(&set(&[4])), GroupChange::Unchanged);
        assert_eq!(groups.group_or_ungroup(&set(&[])), GroupChange::Unchanged);
    }

    #[test]
    fn test_regroup_steals_members() {
        let mut groups = GroupSet::new();
        groups.push(Group::new([0, 1]));
        groups.push(Group::new([2, 3, 4]));

        assert_eq!(groups.group_or_ungroup(&set(&[1, 2])), GroupChange::Grouped);
        // {0} is left alone and pruned; {3, 4} survives.
        assert_eq!(groups.len(), 2);
        assert!(groups.group_of(0).is_none());
        assert_eq!(groups.group_of(3).map(|g| g.len()), Some(2));
        assert_eq!(groups.group_of(1).map(|g| g.as_set().clone()), Some(set(&[1, 2])));
    }

    #[test]
    fn test_remove_indices_shifts_members() {
        let mut groups = GroupSet::new();
        groups.push(Group::new([1, 4, 6]));
        groups.push(Group::new([2, 3]));

        groups.remove_indices(&set(&[2, 5]));

        // 1 stays, 4 -> 3, 6 -> 4; {2, 3} loses 2 and is pruned.
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.iter().next().map(|g| g.as_set().clone()), Some(set(&[1, 3, 4])));
    }
}
