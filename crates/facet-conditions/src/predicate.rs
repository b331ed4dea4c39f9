//! Predicate trees handed to the query layer.
//!
//! A predicate is either a leaf condition on one column or an AND/OR
//! junction over child predicates. The constructors collapse degenerate
//! junctions (empty, single child) so condition building can combine
//! optional sub-results without special-casing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::ColumnRef;
use crate::value::ScalarValue;

/// How a junction combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JunctionOp {
    And,
    Or,
}

/// An externally resolved top-N/bottom-N restriction.
///
/// The engine never computes the ranked set itself; the description is
/// carried through to the query layer verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSpec {
    /// Number of groups to keep
    pub count: u32,
    /// Keep the bottom of the ordering instead of the top
    pub bottom: bool,
}

/// Leaf condition operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionOp {
    /// Column equals the leaf value
    Equals,
    /// Column has no value
    IsNull,
    /// Column group is restricted to a ranked subset
    Ranking(RankingSpec),
}

/// A leaf condition on a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionLeaf {
    pub column: ColumnRef,
    pub op: ConditionOp,
    pub value: ScalarValue,
}

/// A tree of AND/OR junctions over leaf conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredicateTree {
    Leaf(ConditionLeaf),
    Junction {
        op: JunctionOp,
        children: Vec<PredicateTree>,
    },
}

impl PredicateTree {
    /// Equality leaf. A null value becomes an `IsNull` leaf so the query
    /// layer never sees `= NULL`.
    pub fn equals(column: ColumnRef, value: ScalarValue) -> Self {
        if value.is_null() {
            return Self::is_null(column);
        }
        PredicateTree::Leaf(ConditionLeaf {
            column,
            op: ConditionOp::Equals,
            value,
        })
    }

    /// Null-test leaf.
    pub fn is_null(column: ColumnRef) -> Self {
        PredicateTree::Leaf(ConditionLeaf {
            column,
            op: ConditionOp::IsNull,
            value: ScalarValue::Null,
        })
    }

    /// Ranking leaf carrying an externally resolved top-N spec.
    pub fn ranking(column: ColumnRef, spec: RankingSpec) -> Self {
        PredicateTree::Leaf(ConditionLeaf {
            column,
            op: ConditionOp::Ranking(spec),
            value: ScalarValue::Null,
        })
    }

    /// Combine children under a junction, collapsing degenerate cases:
    /// no children yields `None`, one child yields the child itself.
    pub fn junction(op: JunctionOp, children: Vec<PredicateTree>) -> Option<Self> {
        match children.len() {
            0 => None,
            1 => children.into_iter().next(),
            _ => Some(PredicateTree::Junction { op, children }),
        }
    }

    /// AND of the given children (collapsing).
    pub fn all(children: Vec<PredicateTree>) -> Option<Self> {
        Self::junction(JunctionOp::And, children)
    }

    /// OR of the given children (collapsing).
    pub fn any(children: Vec<PredicateTree>) -> Option<Self> {
        Self::junction(JunctionOp::Or, children)
    }

    /// Number of leaf conditions in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            PredicateTree::Leaf(_) => 1,
            PredicateTree::Junction { children, .. } => {
                children.iter().map(PredicateTree::leaf_count).sum()
            }
        }
    }

    /// Visit every leaf condition in depth-first order.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a ConditionLeaf)) {
        match self {
            PredicateTree::Leaf(leaf) => f(leaf),
            PredicateTree::Junction { children, .. } => {
                for child in children {
                    child.for_each_leaf(f);
                }
            }
        }
    }

    /// Whether some equality leaf references the given column and value.
    pub fn references(&self, column_name: &str, value: &ScalarValue) -> bool {
        let mut found = false;
        self.for_each_leaf(&mut |leaf| {
            if leaf.column.name == column_name
                && leaf.op == ConditionOp::Equals
                && leaf.value == *value
            {
                found = true;
            }
        });
        found
    }
}

impl fmt::Display for PredicateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateTree::Leaf(leaf) => match &leaf.op {
                ConditionOp::Equals => {
                    write!(f, "({} = '{}')", leaf.column.name, leaf.value)
                }
                ConditionOp::IsNull => write!(f, "({} IS NULL)", leaf.column.name),
                ConditionOp::Ranking(spec) => write!(
                    f,
                    "({} IN {} {})",
                    leaf.column.name,
                    if spec.bottom { "BOTTOM" } else { "TOP" },
                    spec.count
                ),
            },
            PredicateTree::Junction { op, children } => {
                let sep = match op {
                    JunctionOp::And => " AND ",
                    JunctionOp::Or => " OR ",
                };
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{sep}")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Supplies an optional ranking restriction per hierarchy level.
///
/// Resolved outside the engine (the ranking dialog, script bindings); the
/// condition builder ANDs whatever comes back onto that level's
/// disjunction.
pub trait RankingResolver {
    fn ranking_for(&self, level: usize) -> Option<PredicateTree>;
}

/// Resolver with no rankings configured.
pub struct NoRanking;

impl RankingResolver for NoRanking {
    fn ranking_for(&self, _level: usize) -> Option<PredicateTree> {
        None
    }
}

impl RankingResolver for Vec<Option<PredicateTree>> {
    fn ranking_for(&self, level: usize) -> Option<PredicateTree> {
        self.get(level).and_then(Clone::clone)
    }
}
