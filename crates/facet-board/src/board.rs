//! The dashboard: an ordered widget collection with merged restriction
//! output and range-to-range propagation.
//!
//! One dashboard belongs to one session; every operation runs on the
//! thread handling that session's interaction or refresh cycle. Shared
//! bounds are captured once per propagation and each dependent derives
//! its own truncated view, so no dependent's truncation is visible to
//! another.

use facet_conditions::{RankingResolver, TableConditions};
use facet_range::intersect;
use facet_selection::SelectionWidget;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::widgets::{RangeWidget, Widget};

/// An ordered collection of uniquely named widgets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dashboard {
    widgets: Vec<Widget>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selection widget. Names must be unique across the
    /// dashboard.
    pub fn add_selection(&mut self, widget: SelectionWidget) -> BoardResult<()> {
        self.ensure_unique(widget.name())?;
        self.widgets.push(Widget::Selection(widget));
        Ok(())
    }

    /// Add a range widget. Names must be unique across the dashboard.
    pub fn add_range(&mut self, widget: RangeWidget) -> BoardResult<()> {
        self.ensure_unique(widget.name())?;
        self.widgets.push(Widget::Range(widget));
        Ok(())
    }

    fn ensure_unique(&self, name: &str) -> BoardResult<()> {
        if self.widgets.iter().any(|w| w.name() == name) {
            return Err(BoardError::DuplicateWidget {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name() == name)
    }

    /// Typed mutable access to a selection widget.
    pub fn selection_mut(&mut self, name: &str) -> BoardResult<&mut SelectionWidget> {
        match self.widget_mut(name)? {
            Widget::Selection(w) => Ok(w),
            Widget::Range(_) => Err(BoardError::NotASelectionWidget {
                name: name.to_string(),
            }),
        }
    }

    /// Typed mutable access to a range widget.
    pub fn range_mut(&mut self, name: &str) -> BoardResult<&mut RangeWidget> {
        match self.widget_mut(name)? {
            Widget::Range(w) => Ok(w),
            Widget::Selection(_) => Err(BoardError::NotARangeWidget {
                name: name.to_string(),
            }),
        }
    }

    fn widget_mut(&mut self, name: &str) -> BoardResult<&mut Widget> {
        self.widgets
            .iter_mut()
            .find(|w| w.name() == name)
            .ok_or_else(|| BoardError::UnknownWidget {
                name: name.to_string(),
            })
    }

    /// Resolve every widget's restriction into one per-table map.
    pub fn resolve(&self, applied: bool, ranking: &dyn RankingResolver) -> TableConditions {
        let mut map = TableConditions::new();
        for widget in &self.widgets {
            match widget {
                Widget::Selection(w) => w.apply_to(&mut map, applied, ranking),
                Widget::Range(w) => w.apply_to(&mut map),
            }
        }
        map
    }

    /// Propagate a source range widget's selection to every linked range
    /// widget.
    ///
    /// Widgets link when their leading dimension columns name the same
    /// underlying column with compatible types; the shared bounds are
    /// captured once and re-viewed per dependent, truncated to each
    /// dependent's compatible prefix. Returns the names of dependents
    /// whose windows actually changed.
    pub fn propagate_range(&mut self, source_name: &str) -> BoardResult<Vec<String>> {
        let source = match self.widget_mut(source_name)? {
            Widget::Range(w) => w,
            Widget::Selection(_) => {
                return Err(BoardError::NotARangeWidget {
                    name: source_name.to_string(),
                })
            }
        };
        let bounds = source.shared_bounds();
        let source_column = source.columns().first().cloned();

        let mut changed = Vec::new();
        for widget in &mut self.widgets {
            let Widget::Range(dependent) = widget else {
                continue;
            };
            if dependent.name() == source_name {
                continue;
            }
            let linked = match (&source_column, dependent.columns().first()) {
                (Some(src), Some(dep)) => src.name == dep.name && src.ty.compatible(dep.ty),
                _ => false,
            };
            if !linked {
                continue;
            }

            let view = bounds.matched(&dependent.column_types());
            let result = intersect(dependent.filter(), &view);
            if dependent.apply_intersection(result) {
                tracing::debug!(
                    source = source_name,
                    dependent = dependent.name(),
                    ?result,
                    "propagated range selection"
                );
                changed.push(dependent.name().to_string());
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_conditions::{ColumnRef, ColumnType, NoRanking, ScalarValue};
    use facet_range::{RangeFilter, TickValue};

    fn year_range(name: &str, years: &[i64]) -> RangeWidget {
        RangeWidget::new(
            name,
            "sales",
            vec![ColumnRef::new("Year", ColumnType::Integer)],
            RangeFilter::new(
                years
                    .iter()
                    .map(|y| TickValue::single(ScalarValue::Int(*y)))
                    .collect(),
            ),
        )
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut board = Dashboard::new();
        board.add_range(year_range("years", &[2020, 2021])).unwrap();
        assert_eq!(
            board.add_range(year_range("years", &[2020, 2021])),
            Err(BoardError::DuplicateWidget {
                name: "years".to_string()
            })
        );
    }

    #[test]
    fn propagation_requires_a_range_source() {
        let mut board = Dashboard::new();
        assert_eq!(
            board.propagate_range("missing"),
            Err(BoardError::UnknownWidget {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn unlinked_dimensions_are_left_alone() {
        let mut board = Dashboard::new();
        board
            .add_range(year_range("years", &[2020, 2021, 2022, 2023]))
            .unwrap();
        board
            .add_range(RangeWidget::new(
                "amounts",
                "sales",
                vec![ColumnRef::new("Amount", ColumnType::Float)],
                RangeFilter::new(
                    [10.0, 20.0, 30.0]
                        .iter()
                        .map(|v| TickValue::single(ScalarValue::Float(*v)))
                        .collect(),
                ),
            ))
            .unwrap();

        board.range_mut("years").unwrap().filter_mut().select_window(0, 1);
        let changed = board.propagate_range("years").unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn resolve_skips_unrestricting_widgets() {
        let board = {
            let mut board = Dashboard::new();
            board.add_range(year_range("years", &[2020, 2021])).unwrap();
            board
        };
        assert!(board.resolve(true, &NoRanking).is_empty());
    }
}
