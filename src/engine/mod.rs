//! Decision engine
//!
//! Framework-free table composition logic: column width compilation, cell
//! wrapper resolution, action overflow layout, pagination cursor arithmetic,
//! per-row ephemeral UI state and table phase planning. Nothing in this
//! module touches a terminal; the `ui` module adapts the plans produced
//! here to ratatui.

pub mod actions;
pub mod cells;
pub mod columns;
pub mod pagination;
pub mod row_state;
pub mod table;
