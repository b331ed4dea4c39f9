//! Per-table restriction maps.
//!
//! Every widget contributes at most one restriction per target table,
//! keyed by its filter key so several widgets bound to the same column set
//! stay distinguishable. The dashboard merges widget maps into one and
//! hands the result to the query layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::ColumnRef;
use crate::predicate::PredicateTree;
use crate::value::ScalarValue;

/// One widget's restriction on one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Restriction {
    /// A predicate tree (tree- and column-mode selection widgets)
    Predicate(PredicateTree),
    /// An explicit value list (ID-mode widgets). An empty list means
    /// "restrict to nothing", which is distinct from having no entry at
    /// all ("no restriction").
    Values {
        column: ColumnRef,
        values: Vec<ScalarValue>,
    },
    /// A range widget's effective bounds. The query layer turns these
    /// into comparison operators.
    Range {
        column: ColumnRef,
        min: ScalarValue,
        max: ScalarValue,
        max_inclusive: bool,
    },
}

/// Restrictions keyed by table name, then by filter key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableConditions {
    map: BTreeMap<String, BTreeMap<String, Restriction>>,
}

impl TableConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a restriction, replacing any earlier one under the same
    /// table and filter key.
    pub fn insert(
        &mut self,
        table: impl Into<String>,
        filter_key: impl Into<String>,
        restriction: Restriction,
    ) {
        self.map
            .entry(table.into())
            .or_default()
            .insert(filter_key.into(), restriction);
    }

    /// Merge another map into this one. Entries from `other` win on
    /// matching table and filter key.
    pub fn merge(&mut self, other: TableConditions) {
        for (table, entries) in other.map {
            let slot = self.map.entry(table).or_default();
            for (key, restriction) in entries {
                slot.insert(key, restriction);
            }
        }
    }

    /// Restrictions for one table, in filter-key order.
    pub fn for_table(&self, table: &str) -> impl Iterator<Item = (&str, &Restriction)> {
        self.map
            .get(table)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(k, r)| (k.as_str(), r)))
    }

    /// One restriction by table and filter key.
    pub fn get(&self, table: &str, filter_key: &str) -> Option<&Restriction> {
        self.map.get(table)?.get(filter_key)
    }

    /// Tables with at least one restriction.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Total number of restrictions across all tables.
    pub fn len(&self) -> usize {
        self.map.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.values().all(BTreeMap::is_empty)
    }
}
