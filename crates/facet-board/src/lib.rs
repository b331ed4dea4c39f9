//! facet-board - Dashboard assembly for the facet engine
//!
//! Ties the engine crates together the way a dashboard session uses
//! them:
//!
//! - **Widgets**: selection widgets (from `facet-selection`) and range
//!   widgets (a `facet-range` filter bound to a table and columns)
//! - **Resolution**: every widget's restriction merged into one
//!   per-table map for the query layer (`Dashboard::resolve`)
//! - **Propagation**: a range widget's selection pushed onto linked
//!   range widgets via shared-bounds intersection
//!   (`Dashboard::propagate_range`)
//!
//! A dashboard is single-session, single-threaded state: no locks, no
//! interior mutability, mutation only through `&mut self`.
//!
//! # Examples
//!
//! ```
//! use facet_board::{Dashboard, RangeWidget};
//! use facet_conditions::{ColumnRef, ColumnType, NoRanking, ScalarValue};
//! use facet_range::{RangeFilter, TickValue};
//!
//! let year_col = ColumnRef::new("Year", ColumnType::Integer);
//! let ticks: Vec<TickValue> = (2020..=2025)
//!     .map(|y| TickValue::single(ScalarValue::Int(y)))
//!     .collect();
//!
//! let mut board = Dashboard::new();
//! board
//!     .add_range(RangeWidget::new(
//!         "years",
//!         "sales",
//!         vec![year_col],
//!         RangeFilter::new(ticks),
//!     ))
//!     .unwrap();
//!
//! board.range_mut("years").unwrap().filter_mut().select_window(1, 2);
//! let map = board.resolve(true, &NoRanking);
//! assert!(map.get("sales", "years").is_some());
//! ```

pub mod board;
pub mod error;
pub mod widgets;

pub use board::Dashboard;
pub use error::{BoardError, BoardResult};
pub use widgets::{RangeWidget, Widget};
