//! Path collection over selection trees.
//!
//! Consumers that need a flat view of hierarchical picks (persistence,
//! associative resolution) work in path keys: each ancestor's value joined
//! with `/`. Beyond every node's own path, a sibling list whose first
//! selected member is encountered contributes one synthetic marker path,
//! signalling "this prefix has a selected child" without enumerating the
//! descendants.

use std::collections::BTreeSet;

use crate::node::SelectionList;

/// Synthetic path suffix marking a prefix with at least one selected
/// child.
pub const CHILD_SELECTION_EXISTS: &str = "CHILD_SELECTION_EXISTS";

/// Collect the path keys of a selection tree.
///
/// With `only_applied`, nodes excluded by associative resolution do not
/// qualify for the marker (their own paths are still collected). Pure:
/// calling twice without mutation returns identical sets.
pub fn collect_paths(list: &SelectionList, only_applied: bool) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    walk(list, "", only_applied, &mut out);
    out
}

fn walk(list: &SelectionList, prefix: &str, only_applied: bool, out: &mut BTreeSet<String>) {
    let mut marker_emitted = false;

    for node in list.iter() {
        let path = join(prefix, &node.path_segment());
        out.insert(path.clone());

        let qualifies = node.is_selected() && (!only_applied || !node.is_excluded());
        if qualifies && !marker_emitted {
            out.insert(join(prefix, CHILD_SELECTION_EXISTS));
            marker_emitted = true;
        }

        if let Some(children) = node.children() {
            walk(children, &path, only_applied, out);
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}/{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{SelectionNode, SelectionState};
    use facet_conditions::ScalarValue;

    fn sample_tree() -> SelectionList {
        SelectionList::from_nodes(vec![SelectionNode::composite(
            ScalarValue::text("USA"),
            "USA",
            0,
            SelectionList::from_nodes(vec![
                SelectionNode::leaf(ScalarValue::text("CA"), "California", 1)
                    .with_state(SelectionState::SELECTED),
                SelectionNode::leaf(ScalarValue::text("NY"), "New York", 1),
            ]),
        )
        .with_state(SelectionState::SELECTED)])
    }

    #[test]
    fn collects_every_node_path() {
        let paths = collect_paths(&sample_tree(), false);
        assert!(paths.contains("USA"));
        assert!(paths.contains("USA/CA"));
        assert!(paths.contains("USA/NY"));
    }

    #[test]
    fn marker_once_per_prefix() {
        let paths = collect_paths(&sample_tree(), false);
        assert!(paths.contains(CHILD_SELECTION_EXISTS));
        assert!(paths.contains("USA/CHILD_SELECTION_EXISTS"));
    }

    #[test]
    fn excluded_node_keeps_path_but_not_marker() {
        let tree = SelectionList::from_nodes(vec![SelectionNode::leaf(
            ScalarValue::text("NY"),
            "New York",
            0,
        )
        .with_state(SelectionState::SELECTED | SelectionState::EXCLUDED)]);

        let applied = collect_paths(&tree, true);
        assert!(applied.contains("NY"));
        assert!(!applied.contains(CHILD_SELECTION_EXISTS));

        let unapplied = collect_paths(&tree, false);
        assert!(unapplied.contains(CHILD_SELECTION_EXISTS));
    }

    #[test]
    fn null_value_uses_sentinel_segment() {
        let tree = SelectionList::from_nodes(vec![SelectionNode::leaf(
            ScalarValue::Null,
            "(none)",
            0,
        )]);
        let paths = collect_paths(&tree, false);
        assert!(paths.contains(facet_conditions::NULL_VALUE));
    }

    #[test]
    fn idempotent_without_mutation() {
        let tree = sample_tree();
        assert_eq!(collect_paths(&tree, true), collect_paths(&tree, true));
        assert_eq!(collect_paths(&tree, false), collect_paths(&tree, false));
    }
}
