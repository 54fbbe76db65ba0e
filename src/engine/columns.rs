//! Column compilation
//!
//! Turns a declarative ordered column list into renderable column
//! definitions with computed percentage widths. Widths are relative: each
//! column's share is its weight over the sum of all weights. A zero-sum
//! set falls back to an equal split so downstream layout never sees
//! NaN/Infinity.

use crate::data::CellValue;
use std::sync::Arc;

/// Accessor key reserved for the actions column.
pub const ACTIONS_COLUMN_KEY: &str = "actions";

/// Typed accessor paired with a column: reads one field off a record.
pub type CellAccessor<R> = Arc<dyn Fn(&R) -> CellValue>;

/// Custom cell function: produces the cell's base content for a record.
pub type CellContentFn<R> = Arc<dyn Fn(&R) -> String>;

/// Tooltip request on a column.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipSpec {
    /// Tooltip text is the stringified field value.
    FromValue,
    /// Tooltip text is a fixed literal.
    Text(String),
}

/// Declarative description of one column.
pub struct ColumnSpec<R> {
    /// Accessor key; also the column's identity for the reserved actions
    /// column check and for memoization.
    pub key: String,
    /// Header label.
    pub header: String,
    /// Unitless weight; only relative magnitude matters.
    pub size: f64,
    /// Explicit width in terminal cells. Always wins over the computed
    /// percentage when present.
    pub explicit_width: Option<u16>,
    /// Typed field accessor. Absent means the column has no raw value
    /// (e.g. the actions column).
    pub accessor: Option<CellAccessor<R>>,
    /// Custom cell content function.
    pub cell: Option<CellContentFn<R>>,
    /// Tooltip request.
    pub tooltip: Option<TooltipSpec>,
    /// Whether the cell carries a copy affordance.
    pub clipboard: bool,
}

impl<R> ColumnSpec<R> {
    pub fn new(key: impl Into<String>, header: impl Into<String>, size: f64) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            size,
            explicit_width: None,
            accessor: None,
            cell: None,
            tooltip: None,
            clipboard: false,
        }
    }

    pub fn accessor(mut self, accessor: impl Fn(&R) -> CellValue + 'static) -> Self {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    pub fn cell(mut self, cell: impl Fn(&R) -> String + 'static) -> Self {
        self.cell = Some(Arc::new(cell));
        self
    }

    pub fn tooltip(mut self) -> Self {
        self.tooltip = Some(TooltipSpec::FromValue);
        self
    }

    pub fn tooltip_text(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(TooltipSpec::Text(text.into()));
        self
    }

    pub fn clipboard(mut self) -> Self {
        self.clipboard = true;
        self
    }

    pub fn explicit_width(mut self, width: u16) -> Self {
        self.explicit_width = Some(width);
        self
    }

    /// Read the raw field value for a record. Columns without an accessor
    /// report null, which renders as empty content.
    pub fn field_value(&self, row: &R) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => CellValue::Null,
        }
    }
}

/// A column definition ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledColumn {
    pub key: String,
    pub header: String,
    /// Percentage share of total table width.
    pub width_pct: f64,
    /// Explicit width override, if the spec carried one.
    pub explicit_width: Option<u16>,
}

/// Compile column specs into renderable definitions with computed widths.
///
/// Positive-weight sets produce percentages that sum to 100 (within
/// floating point). Weights that are negative or non-finite are treated as
/// zero; an all-zero set splits the width equally.
pub fn compile_columns<R>(specs: &[ColumnSpec<R>]) -> Vec<CompiledColumn> {
    if specs.is_empty() {
        return Vec::new();
    }

    let weights: Vec<f64> = specs
        .iter()
        .map(|spec| {
            if spec.size.is_finite() && spec.size > 0.0 {
                spec.size
            } else {
                0.0
            }
        })
        .collect();

    let total_weight: f64 = weights.iter().sum();
    let equal_share = 100.0 / specs.len() as f64;

    specs
        .iter()
        .zip(weights.iter())
        .map(|(spec, &weight)| {
            let width_pct = if total_weight > 0.0 {
                weight / total_weight * 100.0
            } else {
                equal_share
            };

            CompiledColumn {
                key: spec.key.clone(),
                header: spec.header.clone(),
                width_pct,
                explicit_width: spec.explicit_width,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs_with_sizes(sizes: &[f64]) -> Vec<ColumnSpec<()>> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| ColumnSpec::new(format!("col{}", i), format!("Col {}", i), size))
            .collect()
    }

    #[test]
    fn test_widths_sum_to_100() {
        let specs = specs_with_sizes(&[2.0, 1.0, 3.0, 0.5]);
        let compiled = compile_columns(&specs);

        let sum: f64 = compiled.iter().map(|c| c.width_pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_to_one_split() {
        let specs = specs_with_sizes(&[2.0, 1.0]);
        let compiled = compile_columns(&specs);

        assert!((compiled[0].width_pct - 66.666666).abs() < 1e-3);
        assert!((compiled[1].width_pct - 33.333333).abs() < 1e-3);
    }

    #[test]
    fn test_zero_weight_set_splits_equally() {
        let specs = specs_with_sizes(&[0.0, 0.0, 0.0, 0.0]);
        let compiled = compile_columns(&specs);

        for column in &compiled {
            assert!((column.width_pct - 25.0).abs() < 1e-9);
            assert!(column.width_pct.is_finite());
        }
    }

    #[test]
    fn test_non_finite_weights_do_not_poison_layout() {
        let specs = specs_with_sizes(&[f64::NAN, 1.0, f64::INFINITY]);
        let compiled = compile_columns(&specs);

        let sum: f64 = compiled.iter().map(|c| c.width_pct).sum();
        assert!(sum.is_finite());
        assert!((compiled[1].width_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_spec_list() {
        let compiled = compile_columns::<()>(&[]);
        assert!(compiled.is_empty());
    }

    #[test]
    fn test_explicit_width_carried_through() {
        let mut specs = specs_with_sizes(&[1.0, 1.0]);
        specs[1].explicit_width = Some(12);

        let compiled = compile_columns(&specs);
        assert_eq!(compiled[0].explicit_width, None);
        assert_eq!(compiled[1].explicit_width, Some(12));
    }
}
