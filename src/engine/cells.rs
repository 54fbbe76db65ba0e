//! Cell content planning
//!
//! Resolves what a cell shows and which wrappers it carries. Wrappers
//! compose in a fixed order: the clipboard affordance is innermost, the
//! tooltip outermost, so a cell with both plans out as
//! `Tooltip(Clipboard(content))`. The plan is plain data; the clipboard
//! runtime and the drawing code live in the `ui` module.

use crate::data::CellValue;
use crate::engine::columns::{ColumnSpec, TooltipSpec};

/// Planned content of one cell, with wrappers encoded structurally.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Raw field value rendered as plain text.
    Plain(String),
    /// Output of a per-column custom cell function.
    Custom(String),
    /// The cell delegates to the action layout for its row.
    Actions,
    /// Copy affordance carrying the string-coerced field value.
    Clipboard {
        value: String,
        inner: Box<CellContent>,
    },
    /// Hover/focus tooltip.
    Tooltip {
        text: String,
        inner: Box<CellContent>,
    },
}

impl CellContent {
    /// The text the cell displays, ignoring wrappers.
    pub fn display_text(&self) -> &str {
        match self {
            CellContent::Plain(text) | CellContent::Custom(text) => text,
            CellContent::Actions => "",
            CellContent::Clipboard { inner, .. } | CellContent::Tooltip { inner, .. } => {
                inner.display_text()
            }
        }
    }

    /// The copyable value, if a clipboard wrapper is present at any depth.
    pub fn clipboard_value(&self) -> Option<&str> {
        match self {
            CellContent::Clipboard { value, .. } => Some(value),
            CellContent::Tooltip { inner, .. } => inner.clipboard_value(),
            _ => None,
        }
    }

    /// The tooltip text, if a tooltip wrapper is present.
    pub fn tooltip_text(&self) -> Option<&str> {
        match self {
            CellContent::Tooltip { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_actions(&self) -> bool {
        matches!(self, CellContent::Actions)
    }
}

/// Plan the content for one cell.
///
/// Resolution order, first match wins:
/// 1. the reserved actions key with an actions config present,
/// 2. a per-column custom cell function (the raw field value is still read
///    for wrapper purposes),
/// 3. plain text of the field value when a tooltip or clipboard is
///    requested,
/// 4. default passthrough of the field value.
///
/// Never panics; null and missing fields plan as empty content, and a null
/// value suppresses the copy affordance while `0` and `""` keep it.
pub fn plan_cell<R>(
    spec: &ColumnSpec<R>,
    row: &R,
    actions_key: &str,
    has_actions: bool,
) -> CellContent {
    if spec.key == actions_key && has_actions {
        return CellContent::Actions;
    }

    let value = spec.field_value(row);

    let base = match &spec.cell {
        Some(cell) => CellContent::Custom(cell(row)),
        None => CellContent::Plain(value.to_string()),
    };

    let wrapped = match (spec.clipboard, value.clipboard_text()) {
        (true, Some(text)) => CellContent::Clipboard {
            value: text,
            inner: Box::new(base),
        },
        _ => base,
    };

    match &spec.tooltip {
        Some(TooltipSpec::Text(text)) => CellContent::Tooltip {
            text: text.clone(),
            inner: Box::new(wrapped),
        },
        Some(TooltipSpec::FromValue) => CellContent::Tooltip {
            text: value.to_string(),
            inner: Box::new(wrapped),
        },
        None => wrapped,
    }
}
