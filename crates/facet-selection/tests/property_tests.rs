//! Property tests over arbitrary selection trees.

use facet_conditions::{ColumnRef, ColumnType, NoRanking, ScalarValue};
use facet_selection::{
    build_conditions, collect_paths, deselect_from, SelectionList, SelectionNode, SelectionPolicy,
    SelectionState,
};
use proptest::prelude::*;

fn state_from_bits(bits: u8) -> SelectionState {
    let mut state = SelectionState::NONE;
    if bits & 1 != 0 {
        state = state.with(SelectionState::SELECTED);
    }
    if bits & 2 != 0 {
        state = state.with(SelectionState::EXCLUDED);
    }
    if bits & 4 != 0 {
        state = state.with(SelectionState::INCLUDED);
    }
    state
}

/// Two-level trees with small value alphabets: enough shape diversity for
/// the traversal properties without unbounded recursion.
fn arb_tree() -> impl Strategy<Value = SelectionList> {
    let child = (0u8..6, 0u8..8).prop_map(|(v, bits)| {
        SelectionNode::leaf(ScalarValue::text(format!("c{v}")), format!("c{v}"), 1)
            .with_state(state_from_bits(bits))
    });
    let node = (0u8..6, 0u8..8, prop::collection::vec(child, 0..4)).prop_map(
        |(v, bits, children)| {
            let value = ScalarValue::text(format!("p{v}"));
            let label = format!("p{v}");
            if children.is_empty() {
                SelectionNode::leaf(value, label, 0).with_state(state_from_bits(bits))
            } else {
                SelectionNode::composite(value, label, 0, SelectionList::from_nodes(children))
                    .with_state(state_from_bits(bits))
            }
        },
    );
    prop::collection::vec(node, 0..5).prop_map(SelectionList::from_nodes)
}

proptest! {
    /// Path collection is pure: two calls without mutation agree.
    #[test]
    fn collect_paths_is_idempotent(tree in arb_tree(), only_applied in any::<bool>()) {
        prop_assert_eq!(
            collect_paths(&tree, only_applied),
            collect_paths(&tree, only_applied)
        );
    }

    /// Every node path appears in the collected set.
    #[test]
    fn collect_paths_covers_every_node(tree in arb_tree()) {
        let paths = collect_paths(&tree, false);
        let mut missing = 0;
        for node in tree.iter() {
            if !paths.contains(&node.path_segment()) {
                missing += 1;
            }
            if let Some(children) = node.children() {
                for child in children.iter() {
                    let path = format!("{}/{}", node.path_segment(), child.path_segment());
                    if !paths.contains(&path) {
                        missing += 1;
                    }
                }
            }
        }
        prop_assert_eq!(missing, 0);
    }

    /// A second cascade from the same level never reports a change.
    #[test]
    fn deselect_from_converges(mut tree in arb_tree(), level in 0i32..3) {
        deselect_from(&mut tree, level);
        prop_assert!(!deselect_from(&mut tree, level));
    }

    /// After a full cascade nothing stays selected.
    #[test]
    fn full_cascade_clears_all(mut tree in arb_tree()) {
        deselect_from(&mut tree, 0);
        prop_assert_eq!(tree.selected_count(), 0);
    }

    /// A leaf value is referenced by the built predicate iff some node
    /// carrying it is selected and not excluded.
    #[test]
    fn conditions_agree_with_flat_selection(tree in arb_tree()) {
        let columns = vec![Some(ColumnRef::new("v", ColumnType::Text))];
        let predicate =
            build_conditions(&tree, &columns, 0, &SelectionPolicy::new(), &NoRanking);

        for node in tree.iter() {
            let applied = node.state().is_applied();
            let referenced = predicate
                .as_ref()
                .is_some_and(|p| p.references("v", node.value()));
            if applied {
                prop_assert!(referenced);
            }
        }
        // And the reverse: every referenced value belongs to some applied node.
        if let Some(p) = &predicate {
            let mut ok = true;
            p.for_each_leaf(&mut |leaf| {
                let has_applied_node = tree
                    .iter()
                    .any(|n| n.value() == &leaf.value && n.state().is_applied());
                ok &= has_applied_node;
            });
            prop_assert!(ok);
        }
    }
}
