//! facet-selection - Selection-state trees and condition building
//!
//! The selection half of the facet engine:
//!
//! - **Nodes and trees**: pickable values with a selection bitmask, flat
//!   or nested per hierarchy level (`SelectionNode`, `SelectionList`)
//! - **Path tracking**: flat path-key views of hierarchical picks
//!   (`collect_paths`)
//! - **Condition building**: selection trees to AND/OR predicate trees
//!   (`build_conditions`)
//! - **ID-mode extraction**: flat value-list output
//!   (`extract_id_selection`)
//! - **Cascading deselection**: level-bounded clearing (`deselect_from`)
//! - **Widget state**: design/state tree pair, refresh reconciliation,
//!   restriction production (`SelectionWidget`)
//!
//! # Examples
//!
//! ```
//! use facet_conditions::{ColumnRef, ColumnType, NoRanking};
//! use facet_selection::{BindingMode, SelectionList, SelectionNode, SelectionWidget};
//! use facet_conditions::ScalarValue;
//!
//! let mut widget = SelectionWidget::new(
//!     "country",
//!     "sales",
//!     BindingMode::Column,
//!     vec![Some(ColumnRef::new("Country", ColumnType::Text))],
//! );
//! widget.set_values(SelectionList::from_nodes(vec![
//!     SelectionNode::leaf(ScalarValue::text("USA"), "USA", 0),
//! ]));
//! widget.toggle_path("USA").unwrap();
//! assert!(widget.build_restriction(true, &NoRanking).is_some());
//! ```

pub mod cascade;
pub mod conditions;
pub mod error;
pub mod flat;
pub mod node;
pub mod paths;
pub mod policy;
pub mod widget;

pub use cascade::deselect_from;
pub use conditions::build_conditions;
pub use error::{SelectionError, SelectionResult};
pub use flat::extract_id_selection;
pub use node::{FlatSelectionList, SelectionList, SelectionNode, SelectionState, FLAT_LEVEL};
pub use paths::{collect_paths, CHILD_SELECTION_EXISTS};
pub use policy::SelectionPolicy;
pub use widget::{BindingMode, SelectionWidget};
