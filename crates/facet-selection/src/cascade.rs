//! Cascading deselection.
//!
//! Clearing a level clears everything at and below it; levels above keep
//! their picks. The walk only dispatches per level until it crosses the
//! boundary, then sweeps the remaining subtree in one pass.

use crate::node::{SelectionList, SelectionNode, SelectionState};

/// Clear `SELECTED` on every node at `level` and deeper.
///
/// Returns whether any state actually changed, so callers can skip
/// condition rebuilds and repaints when nothing was cleared.
pub fn deselect_from(list: &mut SelectionList, level: i32) -> bool {
    let mut changed = false;
    for node in list.iter_mut() {
        if node.level() >= level {
            changed |= clear_subtree(node);
        } else if let Some(children) = node.children_mut() {
            changed |= deselect_from(children, level);
        }
    }
    changed
}

/// Clear `SELECTED` on a node and its whole subtree.
fn clear_subtree(node: &mut SelectionNode) -> bool {
    let mut changed = false;
    let state = node.state_mut();
    if state.is_selected() {
        *state = state.without(SelectionState::SELECTED);
        changed = true;
    }
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            changed |= clear_subtree(child);
        }
    }
    changed
}
