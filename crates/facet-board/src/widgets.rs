//! Dashboard widget kinds.
//!
//! A range widget pairs a [`RangeFilter`] with its table binding and
//! dimension columns; the `Widget` enum is what a dashboard owns.

use facet_conditions::{ColumnRef, ColumnType, Restriction, TableConditions};
use facet_range::{Intersection, RangeFilter, SharedBounds};
use facet_selection::SelectionWidget;
use serde::{Deserialize, Serialize};

/// A range filter bound to a table and dimension columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeWidget {
    name: String,
    table: String,
    columns: Vec<ColumnRef>,
    filter: RangeFilter,
}

impl RangeWidget {
    /// Create a range widget. `name` doubles as the filter key in
    /// per-table restriction maps.
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        columns: Vec<ColumnRef>,
        filter: RangeFilter,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns,
            filter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    pub fn filter(&self) -> &RangeFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut RangeFilter {
        &mut self.filter
    }

    /// The dimension's column types, in hierarchy order.
    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|c| c.ty).collect()
    }

    /// Capture this widget's current selection for propagation.
    pub fn shared_bounds(&self) -> SharedBounds {
        SharedBounds::capture(&self.filter, &self.column_types())
    }

    /// Produce this widget's restriction, if it restricts anything.
    pub fn build_restriction(&self) -> Option<Restriction> {
        let selection = self.filter.selection_bounds(false)?;
        let column = self.columns.first()?;
        Some(Restriction::Range {
            column: column.clone(),
            min: selection.min.values().first()?.clone(),
            max: selection.max.values().first()?.clone(),
            max_inclusive: selection.max_inclusive,
        })
    }

    /// Insert this widget's restriction into a per-table map under its
    /// filter key.
    pub fn apply_to(&self, map: &mut TableConditions) {
        if let Some(restriction) = self.build_restriction() {
            map.insert(self.table.clone(), self.name.clone(), restriction);
        }
    }

    /// Apply an intersection result to this widget's window. `Full`
    /// drops the restriction. Returns whether the window changed.
    pub fn apply_intersection(&mut self, result: Intersection) -> bool {
        let before = self.filter.window();
        match result {
            Intersection::Full => self.filter.clear_window(),
            Intersection::Window(window) => {
                self.filter.select_window(window.start, window.length)
            }
        }
        self.filter.window() != before
    }
}

/// One widget on a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Widget {
    Selection(SelectionWidget),
    Range(RangeWidget),
}

impl Widget {
    pub fn name(&self) -> &str {
        match self {
            Widget::Selection(w) => w.name(),
            Widget::Range(w) => w.name(),
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Widget::Selection(w) => w.table(),
            Widget::Range(w) => w.table(),
        }
    }
}
