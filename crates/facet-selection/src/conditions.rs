//! Condition building: selection trees to predicate trees.
//!
//! Sibling values at one hierarchy level OR together; a selected ancestor
//! ANDs with whatever its children restrict. A branch whose ancestor was
//! not itself picked still produces the child restriction alone, so a deep
//! pick without a shallow one is honored.

use facet_conditions::{LevelColumn, PredicateTree, RankingResolver, ScalarValue};

use crate::node::{SelectionList, SelectionNode};
use crate::policy::SelectionPolicy;

/// Build the predicate for `list` at hierarchy `level`.
///
/// `level_columns` holds the resolved column per level; an unresolvable
/// level skips its leaf conditions but still recurses past. Returns `None`
/// when nothing at or below this level restricts anything; callers must
/// treat that as "no restriction", not "restrict to nothing".
pub fn build_conditions(
    list: &SelectionList,
    level_columns: &[LevelColumn],
    level: usize,
    policy: &SelectionPolicy,
    ranking: &dyn RankingResolver,
) -> Option<PredicateTree> {
    if level >= level_columns.len() {
        return None;
    }

    let column = level_columns[level].as_ref();
    if column.is_none() {
        tracing::warn!(level, "level column unresolved, skipping its conditions");
    }

    let disjunction = if level == level_columns.len() - 1 {
        // Innermost level: one leaf per distinct qualifying value.
        let column = column?;
        let mut values: Vec<&ScalarValue> = Vec::new();
        for node in list.iter() {
            if should_include(node, policy) && !values.contains(&node.value()) {
                values.push(node.value());
            }
        }
        PredicateTree::any(
            values
                .into_iter()
                .map(|v| PredicateTree::equals(column.clone(), v.coerced(column.ty)))
                .collect(),
        )
    } else {
        let mut branches = Vec::new();
        for node in list.iter() {
            let own = match (column, should_include(node, policy)) {
                (Some(col), true) => Some(PredicateTree::equals(
                    col.clone(),
                    node.value().coerced(col.ty),
                )),
                _ => None,
            };
            let nested = node.children().and_then(|children| {
                build_conditions(children, level_columns, level + 1, policy, ranking)
            });

            let branch = match (own, nested) {
                (Some(own), Some(nested)) => PredicateTree::all(vec![own, nested]),
                (Some(own), None) => Some(own),
                (None, Some(nested)) => Some(nested),
                (None, None) => None,
            };
            if let Some(branch) = branch {
                branches.push(branch);
            }
        }
        PredicateTree::any(branches)
    };

    // A configured top-N restriction on this level rides along as an
    // extra conjunct; the ranked set itself is resolved externally.
    match (disjunction, ranking.ranking_for(level)) {
        (Some(d), Some(r)) => PredicateTree::all(vec![d, r]),
        (d, _) => d,
    }
}

/// Whether a node contributes its own leaf predicate.
///
/// Directly applied picks always qualify. Under a single-selection-level
/// policy, merely-included ancestors below the configured maximum level
/// qualify too, as long as they are not excluded.
fn should_include(node: &SelectionNode, policy: &SelectionPolicy) -> bool {
    let state = node.state();
    if state.is_applied() {
        return true;
    }
    state.is_included() && !state.is_excluded() && policy.ancestor_qualifies(node.level())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{SelectionNode, SelectionState};
    use facet_conditions::{ColumnRef, ColumnType, ConditionOp, NoRanking, RankingSpec};

    fn columns() -> Vec<LevelColumn> {
        vec![
            Some(ColumnRef::new("Country", ColumnType::Text)),
            Some(ColumnRef::new("State", ColumnType::Text)),
        ]
    }

    fn usa_tree() -> SelectionList {
        SelectionList::from_nodes(vec![SelectionNode::composite(
            ScalarValue::text("USA"),
            "USA",
            0,
            SelectionList::from_nodes(vec![
                SelectionNode::leaf(ScalarValue::text("CA"), "California", 1)
                    .with_state(SelectionState::SELECTED),
                SelectionNode::leaf(ScalarValue::text("NY"), "New York", 1)
                    .with_state(SelectionState::SELECTED | SelectionState::EXCLUDED),
            ]),
        )
        .with_state(SelectionState::SELECTED)])
    }

    #[test]
    fn ancestor_and_child_are_anded() {
        let p = build_conditions(&usa_tree(), &columns(), 0, &SelectionPolicy::new(), &NoRanking)
            .unwrap();
        assert_eq!(p.to_string(), "((Country = 'USA') AND (State = 'CA'))");
    }

    #[test]
    fn excluded_node_never_appears() {
        let p = build_conditions(&usa_tree(), &columns(), 0, &SelectionPolicy::new(), &NoRanking)
            .unwrap();
        assert!(!p.references("State", &ScalarValue::text("NY")));
    }

    #[test]
    fn deep_pick_without_shallow_pick_stands_alone() {
        let tree = SelectionList::from_nodes(vec![SelectionNode::composite(
            ScalarValue::text("USA"),
            "USA",
            0,
            SelectionList::from_nodes(vec![SelectionNode::leaf(
                ScalarValue::text("CA"),
                "California",
                1,
            )
            .with_state(SelectionState::SELECTED)]),
        )]);
        let p =
            build_conditions(&tree, &columns(), 0, &SelectionPolicy::new(), &NoRanking).unwrap();
        assert_eq!(p.to_string(), "(State = 'CA')");
    }

    #[test]
    fn siblings_or_together() {
        let tree = SelectionList::from_nodes(vec![
            SelectionNode::leaf(ScalarValue::text("USA"), "USA", 0)
                .with_state(SelectionState::SELECTED),
            SelectionNode::leaf(ScalarValue::text("Canada"), "Canada", 0)
                .with_state(SelectionState::SELECTED),
        ]);
        let cols = vec![Some(ColumnRef::new("Country", ColumnType::Text))];
        let p = build_conditions(&tree, &cols, 0, &SelectionPolicy::new(), &NoRanking).unwrap();
        assert_eq!(p.to_string(), "((Country = 'USA') OR (Country = 'Canada'))");
    }

    #[test]
    fn null_value_emits_null_leaf() {
        let tree = SelectionList::from_nodes(vec![SelectionNode::leaf(
            ScalarValue::Null,
            "(none)",
            0,
        )
        .with_state(SelectionState::SELECTED)]);
        let cols = vec![Some(ColumnRef::new("Region", ColumnType::Text))];
        let p = build_conditions(&tree, &cols, 0, &SelectionPolicy::new(), &NoRanking).unwrap();
        assert_eq!(p.to_string(), "(Region IS NULL)");
    }

    #[test]
    fn out_of_range_level_is_no_restriction() {
        assert_eq!(
            build_conditions(&usa_tree(), &columns(), 2, &SelectionPolicy::new(), &NoRanking),
            None
        );
        assert_eq!(
            build_conditions(&usa_tree(), &[], 0, &SelectionPolicy::new(), &NoRanking),
            None
        );
    }

    #[test]
    fn unresolved_level_skips_leaf_but_recurses() {
        let cols = vec![None, Some(ColumnRef::new("State", ColumnType::Text))];
        let p = build_conditions(&usa_tree(), &cols, 0, &SelectionPolicy::new(), &NoRanking)
            .unwrap();
        assert_eq!(p.to_string(), "(State = 'CA')");
    }

    #[test]
    fn included_ancestor_qualifies_under_policy() {
        let tree = SelectionList::from_nodes(vec![SelectionNode::composite(
            ScalarValue::text("USA"),
            "USA",
            0,
            SelectionList::from_nodes(vec![SelectionNode::leaf(
                ScalarValue::text("CA"),
                "California",
                1,
            )
            .with_state(SelectionState::SELECTED)]),
        )
        .with_state(SelectionState::INCLUDED)]);

        let without = build_conditions(&tree, &columns(), 0, &SelectionPolicy::new(), &NoRanking)
            .unwrap();
        assert_eq!(without.to_string(), "(State = 'CA')");

        let with = build_conditions(
            &tree,
            &columns(),
            0,
            &SelectionPolicy::with_single_selection(1),
            &NoRanking,
        )
        .unwrap();
        assert_eq!(with.to_string(), "((Country = 'USA') AND (State = 'CA'))");
    }

    #[test]
    fn ranking_rides_along_as_conjunct() {
        let rankings: Vec<Option<PredicateTree>> = vec![
            None,
            Some(PredicateTree::ranking(
                ColumnRef::new("State", ColumnType::Text),
                RankingSpec {
                    count: 5,
                    bottom: false,
                },
            )),
        ];
        let p = build_conditions(&usa_tree(), &columns(), 0, &SelectionPolicy::new(), &rankings)
            .unwrap();

        let mut saw_ranking = false;
        p.for_each_leaf(&mut |leaf| {
            if matches!(leaf.op, ConditionOp::Ranking(_)) {
                saw_ranking = true;
            }
        });
        assert!(saw_ranking);
        // The ranking is a conjunct, never an expansion of explicit values.
        assert!(p.references("State", &ScalarValue::text("CA")));
    }

    #[test]
    fn duplicate_leaf_values_collapse() {
        let tree = SelectionList::from_nodes(vec![
            SelectionNode::leaf(ScalarValue::text("CA"), "California", 0)
                .with_state(SelectionState::SELECTED),
            SelectionNode::leaf(ScalarValue::text("CA"), "California (dup)", 0)
                .with_state(SelectionState::SELECTED),
        ]);
        let cols = vec![Some(ColumnRef::new("State", ColumnType::Text))];
        let p = build_conditions(&tree, &cols, 0, &SelectionPolicy::new(), &NoRanking).unwrap();
        assert_eq!(p.leaf_count(), 1);
    }
}
