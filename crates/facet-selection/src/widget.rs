//! Selection widget state.
//!
//! A widget keeps two parallel trees: the design tree holds every
//! selectable value and its current label, rebuilt from the data source on
//! every refresh; the state tree holds only nodes with selection-relevant
//! state and survives refreshes. User operations materialize design nodes
//! into the state tree on demand; a refresh reconciles the state tree
//! against the new design tree, dropping picks whose values disappeared.

use facet_conditions::{LevelColumn, RankingResolver, Restriction, TableConditions};
use serde::{Deserialize, Serialize};

use crate::cascade::deselect_from;
use crate::conditions::build_conditions;
use crate::error::{SelectionError, SelectionResult};
use crate::flat::extract_id_selection;
use crate::node::{SelectionList, SelectionNode, SelectionState, FLAT_LEVEL};
use crate::policy::SelectionPolicy;

/// How a widget's values bind to columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingMode {
    /// One explicit column per hierarchy level; values nest in the tree.
    Column,
    /// One flat list bound to a single column, with parent/child linkage
    /// reconstructed at display time. Never filtered hierarchically.
    Id,
}

/// One selection widget: its binding, policy, and value/state trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionWidget {
    name: String,
    table: String,
    binding: BindingMode,
    columns: Vec<LevelColumn>,
    policy: SelectionPolicy,
    design: SelectionList,
    state: SelectionList,
}

impl SelectionWidget {
    /// Create a widget with empty trees. `name` doubles as the filter key
    /// in per-table restriction maps.
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        binding: BindingMode,
        columns: Vec<LevelColumn>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            binding,
            columns,
            policy: SelectionPolicy::default(),
            design: SelectionList::new(),
            state: SelectionList::new(),
        }
    }

    /// Builder-style policy override.
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn binding(&self) -> BindingMode {
        self.binding
    }

    pub fn columns(&self) -> &[LevelColumn] {
        &self.columns
    }

    /// The full value tree (every selectable value).
    pub fn design(&self) -> &SelectionList {
        &self.design
    }

    /// The persisted state tree (nodes with selection-relevant state).
    pub fn state(&self) -> &SelectionList {
        &self.state
    }

    /// Whether any value is currently selected.
    pub fn has_selection(&self) -> bool {
        self.state.any_selected()
    }

    /// Replace the design tree after a data refresh and reconcile the
    /// state tree against it: picks whose values disappeared are dropped,
    /// labels are re-synced from the new design tree.
    pub fn set_values(&mut self, design: SelectionList) {
        self.design = design;
        let dropped = reconcile(&mut self.state, &self.design);
        if dropped > 0 {
            tracing::debug!(
                widget = %self.name,
                dropped,
                "dropped state nodes without a design counterpart"
            );
        }
    }

    /// Toggle the pick at a `/`-joined value path. Returns the new
    /// selected state.
    pub fn toggle_path(&mut self, path: &str) -> SelectionResult<bool> {
        let node = self.materialize(path)?;
        let state = node.state_mut();
        *state = if state.is_selected() {
            state.without(SelectionState::SELECTED)
        } else {
            state.with(SelectionState::SELECTED)
        };
        Ok(node.is_selected())
    }

    /// Mark or unmark a value as excluded by associative resolution.
    pub fn set_excluded(&mut self, path: &str, excluded: bool) -> SelectionResult<()> {
        let node = self.materialize(path)?;
        let state = node.state_mut();
        *state = if excluded {
            state.with(SelectionState::EXCLUDED)
        } else {
            state.without(SelectionState::EXCLUDED)
        };
        Ok(())
    }

    /// Mark or unmark a value as included (implied by a deeper pick).
    pub fn set_included(&mut self, path: &str, included: bool) -> SelectionResult<()> {
        let node = self.materialize(path)?;
        let state = node.state_mut();
        *state = if included {
            state.with(SelectionState::INCLUDED)
        } else {
            state.without(SelectionState::INCLUDED)
        };
        Ok(())
    }

    /// Clear every pick in the widget. Returns whether anything changed.
    pub fn clear_selection(&mut self) -> bool {
        deselect_from(&mut self.state, FLAT_LEVEL)
    }

    /// Clear picks at `level` and deeper. Returns whether anything
    /// changed.
    pub fn deselect_from_level(&mut self, level: i32) -> bool {
        deselect_from(&mut self.state, level)
    }

    /// Produce this widget's restriction, if it restricts anything.
    ///
    /// Column mode builds a predicate tree over the hierarchy levels. ID
    /// mode emits the selected value list; with every selected value
    /// excluded under `applied`, the list is empty, which means "restrict
    /// to nothing" and is deliberately distinct from `None`.
    pub fn build_restriction(
        &self,
        applied: bool,
        ranking: &dyn RankingResolver,
    ) -> Option<Restriction> {
        match self.binding {
            BindingMode::Id => {
                let column = match self.columns.first().and_then(Option::as_ref) {
                    Some(column) => column,
                    None => {
                        tracing::warn!(
                            widget = %self.name,
                            "ID-mode widget has no resolvable bound column"
                        );
                        return None;
                    }
                };
                if !self.state.any_selected() {
                    return None;
                }
                Some(Restriction::Values {
                    column: column.clone(),
                    values: extract_id_selection(&self.state, applied, column),
                })
            }
            BindingMode::Column => {
                build_conditions(&self.state, &self.columns, 0, &self.policy, ranking)
                    .map(Restriction::Predicate)
            }
        }
    }

    /// Insert this widget's restriction into a per-table map under its
    /// filter key.
    pub fn apply_to(
        &self,
        map: &mut TableConditions,
        applied: bool,
        ranking: &dyn RankingResolver,
    ) {
        if let Some(restriction) = self.build_restriction(applied, ranking) {
            map.insert(self.table.clone(), self.name.clone(), restriction);
        }
    }

    /// Find the state node at `path`, materializing it (and its
    /// ancestors) from the design tree when absent.
    fn materialize(&mut self, path: &str) -> SelectionResult<&mut SelectionNode> {
        if self.design.node_at_path(path).is_none() {
            return Err(SelectionError::PathNotFound {
                path: path.to_string(),
            });
        }
        let segments: Vec<&str> = path.split('/').collect();
        materialize_in(&mut self.state, &self.design, &segments).ok_or_else(|| {
            SelectionError::PathNotFound {
                path: path.to_string(),
            }
        })
    }
}

/// Descend `segments`, inserting state shells cloned from the design tree
/// where missing, and return the final node.
fn materialize_in<'a>(
    state: &'a mut SelectionList,
    design: &SelectionList,
    segments: &[&str],
) -> Option<&'a mut SelectionNode> {
    let (first, rest) = segments.split_first()?;
    let design_node = design.iter().find(|n| n.path_segment() == *first)?;

    let existing = state.iter().position(|n| n.path_segment() == *first);
    let index = match existing {
        Some(index) => index,
        None => {
            state.push(shell_of(design_node));
            state.len() - 1
        }
    };
    let node = state.get_mut(index)?;
    if rest.is_empty() {
        Some(node)
    } else {
        materialize_in(node.children_mut()?, design_node.children()?, rest)
    }
}

/// A stateless copy of a design node, children left empty.
fn shell_of(design_node: &SelectionNode) -> SelectionNode {
    match design_node {
        SelectionNode::Leaf {
            value,
            label,
            level,
            ..
        } => SelectionNode::leaf(value.clone(), label.clone(), *level),
        SelectionNode::Composite {
            value,
            label,
            level,
            ..
        } => SelectionNode::composite(value.clone(), label.clone(), *level, SelectionList::new()),
    }
}

/// Drop state nodes without a design counterpart and re-sync labels.
/// Returns the number of dropped nodes.
fn reconcile(state: &mut SelectionList, design: &SelectionList) -> usize {
    let before = state.len();
    state.retain(|node| design.find_value(node.value()).is_some());
    let mut dropped = before - state.len();

    for node in state.iter_mut() {
        // retain above guarantees a counterpart
        let Some(design_node) = design.find_value(node.value()) else {
            continue;
        };
        node.set_label(design_node.label());
        if let Some(children) = node.children_mut() {
            match design_node.children() {
                Some(design_children) => dropped += reconcile(children, design_children),
                None => {
                    // level flattened away in the new design tree
                    let mut count = 0;
                    children.for_each(&mut |_| count += 1);
                    dropped += count;
                    *children = SelectionList::new();
                }
            }
        }
    }
    dropped
}
