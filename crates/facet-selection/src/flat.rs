//! ID-mode selection extraction.
//!
//! ID-bound widgets keep one flat list; hierarchy is reconstructed at
//! display time from out-of-band linkage columns and never filtered
//! hierarchically. Extraction is a single pass in list order; duplicates
//! are kept, the query layer tolerates repeated equality terms.

use facet_conditions::{ColumnRef, ScalarValue};

use crate::node::FlatSelectionList;

/// Extract the selected values of a flat list, coerced to the bound
/// column's type.
///
/// With `applied`, nodes excluded by associative resolution are dropped;
/// without it, every selected node contributes (the what-if view).
pub fn extract_id_selection(
    list: &FlatSelectionList,
    applied: bool,
    column: &ColumnRef,
) -> Vec<ScalarValue> {
    list.iter()
        .filter(|node| node.is_selected() && (!applied || !node.is_excluded()))
        .map(|node| node.value().coerced(column.ty))
        .collect()
}
