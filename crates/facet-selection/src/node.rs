//! Selection nodes, state bitmask, and node containers.
//!
//! A node is a tagged variant: a leaf holds one pickable value, a
//! composite additionally owns an ordered child list representing the next
//! hierarchy level. Nodes never hold parent pointers; traversals pass the
//! accumulated path prefix down instead, so a tree snapshot can be read
//! concurrently without back-edges.

use std::ops::{BitOr, BitOrAssign};

use facet_conditions::ScalarValue;
use serde::{Deserialize, Serialize};

/// Level tag for nodes in a flat (ungrouped) list.
pub const FLAT_LEVEL: i32 = -1;

/// Selection state bitmask.
///
/// `SELECTED` and `EXCLUDED` are independent: a node the user picked can
/// later be excluded by associative resolution without losing the pick.
/// Such a node contributes to what-if views but never to applied
/// predicates. `INCLUDED` marks nodes that are implied by a deeper pick
/// rather than picked directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState(u8);

impl SelectionState {
    pub const NONE: Self = Self(0);
    pub const SELECTED: Self = Self(1);
    pub const EXCLUDED: Self = Self(1 << 1);
    pub const INCLUDED: Self = Self(1 << 2);

    /// Whether every bit of `flags` is set.
    pub fn contains(self, flags: SelectionState) -> bool {
        self.0 & flags.0 == flags.0
    }

    /// This state with the given bits set.
    pub fn with(self, flags: SelectionState) -> Self {
        Self(self.0 | flags.0)
    }

    /// This state with the given bits cleared.
    pub fn without(self, flags: SelectionState) -> Self {
        Self(self.0 & !flags.0)
    }

    pub fn is_selected(self) -> bool {
        self.contains(Self::SELECTED)
    }

    pub fn is_excluded(self) -> bool {
        self.contains(Self::EXCLUDED)
    }

    pub fn is_included(self) -> bool {
        self.contains(Self::INCLUDED)
    }

    /// Selected and not excluded: the node counts toward applied output.
    pub fn is_applied(self) -> bool {
        self.is_selected() && !self.is_excluded()
    }

    /// No selection-relevant bits at all.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SelectionState {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

impl BitOrAssign for SelectionState {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.with(rhs);
    }
}

/// A single pickable value, optionally with nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionNode {
    Leaf {
        value: ScalarValue,
        label: String,
        level: i32,
        state: SelectionState,
    },
    Composite {
        value: ScalarValue,
        label: String,
        level: i32,
        state: SelectionState,
        children: SelectionList,
    },
}

impl SelectionNode {
    /// Create an unselected leaf node.
    pub fn leaf(value: ScalarValue, label: impl Into<String>, level: i32) -> Self {
        SelectionNode::Leaf {
            value,
            label: label.into(),
            level,
            state: SelectionState::NONE,
        }
    }

    /// Create an unselected composite node.
    pub fn composite(
        value: ScalarValue,
        label: impl Into<String>,
        level: i32,
        children: SelectionList,
    ) -> Self {
        SelectionNode::Composite {
            value,
            label: label.into(),
            level,
            state: SelectionState::NONE,
            children,
        }
    }

    /// Builder-style state override.
    pub fn with_state(mut self, new_state: SelectionState) -> Self {
        *self.state_mut() = new_state;
        self
    }

    pub fn value(&self) -> &ScalarValue {
        match self {
            SelectionNode::Leaf { value, .. } | SelectionNode::Composite { value, .. } => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SelectionNode::Leaf { label, .. } | SelectionNode::Composite { label, .. } => label,
        }
    }

    pub fn set_label(&mut self, new_label: impl Into<String>) {
        match self {
            SelectionNode::Leaf { label, .. } | SelectionNode::Composite { label, .. } => {
                *label = new_label.into()
            }
        }
    }

    pub fn level(&self) -> i32 {
        match self {
            SelectionNode::Leaf { level, .. } | SelectionNode::Composite { level, .. } => *level,
        }
    }

    pub fn state(&self) -> SelectionState {
        match self {
            SelectionNode::Leaf { state, .. } | SelectionNode::Composite { state, .. } => *state,
        }
    }

    pub fn state_mut(&mut self) -> &mut SelectionState {
        match self {
            SelectionNode::Leaf { state, .. } | SelectionNode::Composite { state, .. } => state,
        }
    }

    /// Child list, when the node is composite.
    pub fn children(&self) -> Option<&SelectionList> {
        match self {
            SelectionNode::Composite { children, .. } => Some(children),
            SelectionNode::Leaf { .. } => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut SelectionList> {
        match self {
            SelectionNode::Composite { children, .. } => Some(children),
            SelectionNode::Leaf { .. } => None,
        }
    }

    /// The node's contribution to a path key: the value's display form,
    /// with the null marker standing in for a missing value.
    pub fn path_segment(&self) -> String {
        self.value().to_string()
    }

    pub fn is_selected(&self) -> bool {
        self.state().is_selected()
    }

    pub fn is_excluded(&self) -> bool {
        self.state().is_excluded()
    }
}

/// Ordered container of selection nodes. Insertion order is display
/// order; the algorithms only rely on it for path construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionList {
    nodes: Vec<SelectionNode>,
}

/// A flat, single-level selection list (ID-mode widgets). Structurally
/// identical to [`SelectionList`]; the name records intent at call sites.
pub type FlatSelectionList = SelectionList;

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<SelectionNode>) -> Self {
        Self { nodes }
    }

    pub fn push(&mut self, node: SelectionNode) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SelectionNode> {
        self.nodes.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionNode> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SelectionNode> {
        self.nodes.iter_mut()
    }

    pub fn retain(&mut self, f: impl FnMut(&SelectionNode) -> bool) {
        self.nodes.retain(f);
    }

    /// First node in this list with the given value.
    pub fn find_value(&self, value: &ScalarValue) -> Option<&SelectionNode> {
        self.nodes.iter().find(|n| n.value() == value)
    }

    pub fn find_value_mut(&mut self, value: &ScalarValue) -> Option<&mut SelectionNode> {
        self.nodes.iter_mut().find(|n| n.value() == value)
    }

    /// Node at a `/`-joined path of value segments, descending through
    /// composite children.
    pub fn node_at_path(&self, path: &str) -> Option<&SelectionNode> {
        let mut segments = path.split('/');
        let first = segments.next()?;
        let mut node = self.nodes.iter().find(|n| n.path_segment() == first)?;
        for segment in segments {
            node = node
                .children()?
                .iter()
                .find(|n| n.path_segment() == segment)?;
        }
        Some(node)
    }

    pub fn node_at_path_mut(&mut self, path: &str) -> Option<&mut SelectionNode> {
        let mut segments = path.split('/');
        let first = segments.next()?;
        let mut node = self.nodes.iter_mut().find(|n| n.path_segment() == first)?;
        for segment in segments {
            node = node
                .children_mut()?
                .iter_mut()
                .find(|n| n.path_segment() == segment)?;
        }
        Some(node)
    }

    /// Visit every node depth-first, pre-order.
    pub fn for_each(&self, f: &mut impl FnMut(&SelectionNode)) {
        for node in &self.nodes {
            f(node);
            if let Some(children) = node.children() {
                children.for_each(f);
            }
        }
    }

    /// Clear the `INCLUDED` mark on every node. Associative resolution
    /// recomputes implied inclusion from scratch, so stale marks must not
    /// survive a pass.
    pub fn clear_included(&mut self) {
        for node in self.iter_mut() {
            let state = node.state_mut();
            *state = state.without(SelectionState::INCLUDED);
            if let Some(children) = node.children_mut() {
                children.clear_included();
            }
        }
    }

    /// Number of selected nodes anywhere in the tree.
    pub fn selected_count(&self) -> usize {
        let mut count = 0;
        self.for_each(&mut |n| {
            if n.is_selected() {
                count += 1;
            }
        });
        count
    }

    /// Whether any node anywhere in the tree is selected.
    pub fn any_selected(&self) -> bool {
        self.selected_count() > 0
    }
}

impl FromIterator<SelectionNode> for SelectionList {
    fn from_iter<T: IntoIterator<Item = SelectionNode>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
