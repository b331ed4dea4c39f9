//! facet-conditions - Predicate model for facet dashboards
//!
//! This crate provides the value types shared by every filter widget kind:
//!
//! - **Scalar values**: typed values with a total ordering and string
//!   coercion (`ScalarValue`)
//! - **Column metadata**: the boundary types handed over by the hosting
//!   application's column provider (`ColumnRef`, `ColumnType`)
//! - **Predicate trees**: AND/OR junctions over equality/null/ranking
//!   leaves, the output consumed by the query layer (`PredicateTree`)
//! - **Per-table restriction maps**: restrictions keyed by table name and
//!   filter key (`TableConditions`)
//!
//! # Examples
//!
//! ```
//! use facet_conditions::{ColumnRef, ColumnType, PredicateTree, ScalarValue};
//!
//! let country = ColumnRef::new("Country", ColumnType::Text);
//! let leaf = PredicateTree::equals(country, ScalarValue::text("USA"));
//! assert_eq!(leaf.to_string(), "(Country = 'USA')");
//! ```

pub mod column;
pub mod predicate;
pub mod table_map;
pub mod value;

pub use column::{ColumnRef, ColumnType, LevelColumn};
pub use predicate::{
    ConditionLeaf, ConditionOp, JunctionOp, NoRanking, PredicateTree, RankingResolver, RankingSpec,
};
pub use table_map::{Restriction, TableConditions};
pub use value::{
    decode_composite, encode_composite, CompositeDecode, ScalarValue, COMPOSITE_SEPARATOR,
    NULL_VALUE,
};
