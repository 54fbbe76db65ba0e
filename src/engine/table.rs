//! Table plan composition
//!
//! Orchestrates the loading/empty/populated state machine and emits a
//! `TablePlan`: the complete renderable structure for one pass, decoupled
//! from any drawing code. A plan is recomputed from externally supplied
//! inputs on every pass; the only state it reads back is the per-row
//! ephemeral flag map.

use std::sync::Arc;
use tracing::debug;

use crate::data::{RowIdentity, TableDataSource};
use crate::engine::actions::{resolve_actions, ActionLayout, ActionsConfig, RowPredicate};
use crate::engine::cells::{plan_cell, CellContent};
use crate::engine::columns::{compile_columns, ColumnSpec, CompiledColumn, ACTIONS_COLUMN_KEY};
use crate::engine::row_state::RowStateMap;

/// Default number of skeleton rows planned while loading.
pub const DEFAULT_SKELETON_ROWS: usize = 3;

/// Caller-supplied sub-row content for an expanded record.
pub type SubContentFn<R> = Arc<dyn Fn(&R) -> String>;

/// Expansion contract: which rows can expand and what the sub-row shows.
pub struct ExpansionConfig<R> {
    pub can_expand: RowPredicate<R>,
    pub render: SubContentFn<R>,
}

impl<R> ExpansionConfig<R> {
    pub fn new(
        can_expand: impl Fn(&R) -> bool + 'static,
        render: impl Fn(&R) -> String + 'static,
    ) -> Self {
        Self {
            can_expand: Arc::new(can_expand),
            render: Arc::new(render),
        }
    }
}

/// Placeholder copy for the empty state.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyState {
    pub title: String,
    pub description: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No results".to_string(),
            description: "There is nothing to display yet.".to_string(),
        }
    }
}

/// The three table states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePhase {
    Loading,
    Empty,
    Populated,
}

/// One planned data row: cell contents in column order, the resolved
/// action layout when an actions column is present, and the optional
/// expansion sub-row directly beneath it.
pub struct RowPlan<R> {
    pub row_id: String,
    pub cells: Vec<CellContent>,
    pub actions: Option<ActionLayout<R>>,
    pub sub_content: Option<String>,
    pub copied: bool,
}

/// Phase-specific body of a plan.
pub enum TableBody<R> {
    /// Skeleton rows matching the real column count, to avoid layout shift.
    Loading { skeleton_rows: usize },
    Empty { title: String, description: String },
    Populated { rows: Vec<RowPlan<R>> },
}

/// The complete renderable structure for one pass.
pub struct TablePlan<R> {
    pub phase: TablePhase,
    pub columns: Vec<CompiledColumn>,
    pub body: TableBody<R>,
}

/// Builds `TablePlan`s from a column list, an optional actions
/// configuration and per-table display settings.
pub struct TableComposer<R> {
    columns: Vec<ColumnSpec<R>>,
    actions: Option<ActionsConfig<R>>,
    actions_key: String,
    skeleton_rows: usize,
    empty_state: EmptyState,
    expansion: Option<ExpansionConfig<R>>,
}

impl<R: RowIdentity> TableComposer<R> {
    pub fn new(columns: Vec<ColumnSpec<R>>) -> Self {
        Self {
            columns,
            actions: None,
            actions_key: ACTIONS_COLUMN_KEY.to_string(),
            skeleton_rows: DEFAULT_SKELETON_ROWS,
            empty_state: EmptyState::default(),
            expansion: None,
        }
    }

    pub fn actions(mut self, actions: ActionsConfig<R>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Override the accessor key reserved for the actions column.
    pub fn actions_key(mut self, key: impl Into<String>) -> Self {
        self.actions_key = key.into();
        self
    }

    pub fn skeleton_rows(mut self, count: usize) -> Self {
        self.skeleton_rows = count;
        self
    }

    pub fn empty_state(
        mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.empty_state = EmptyState {
            title: title.into(),
            description: description.into(),
        };
        self
    }

    pub fn expansion(mut self, expansion: ExpansionConfig<R>) -> Self {
        self.expansion = Some(expansion);
        self
    }

    /// Compose the plan for the current pass.
    pub fn compose(
        &self,
        source: &dyn TableDataSource<R>,
        row_states: &RowStateMap,
    ) -> TablePlan<R> {
        let columns = compile_columns(&self.columns);

        if source.is_loading() {
            return TablePlan {
                phase: TablePhase::Loading,
                columns,
                body: TableBody::Loading {
                    skeleton_rows: self.skeleton_rows,
                },
            };
        }

        let records = source.rows();
        if records.is_empty() {
            return TablePlan {
                phase: TablePhase::Empty,
                columns,
                body: TableBody::Empty {
                    title: self.empty_state.title.clone(),
                    description: self.empty_state.description.clone(),
                },
            };
        }

        let has_actions = self
            .actions
            .as_ref()
            .map(|config| !config.is_empty())
            .unwrap_or(false);
        let wants_action_layout =
            has_actions && self.columns.iter().any(|spec| spec.key == self.actions_key);

        let rows = records
            .iter()
            .map(|record| {
                let cells = self
                    .columns
                    .iter()
                    .map(|spec| plan_cell(spec, record, &self.actions_key, has_actions))
                    .collect();

                let actions = if wants_action_layout {
                    self.actions
                        .as_ref()
                        .map(|config| resolve_actions(config, record))
                } else {
                    None
                };

                let row_id = record.row_id();
                let sub_content = match &self.expansion {
                    Some(expansion)
                        if (expansion.can_expand)(record) && row_states.is_expanded(&row_id) =>
                    {
                        Some((expansion.render)(record))
                    }
                    _ => None,
                };

                RowPlan {
                    copied: row_states.is_copied(&row_id),
                    row_id,
                    cells,
                    actions,
                    sub_content,
                }
            })
            .collect();

        TablePlan {
            phase: TablePhase::Populated,
            columns,
            body: TableBody::Populated { rows },
        }
    }
}

/// Tracks phase changes across passes and logs the transitions.
#[derive(Debug, Default)]
pub struct PhaseTracker {
    last: Option<TablePhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Record the phase of the latest plan. Returns true when it changed.
    pub fn observe(&mut self, phase: TablePhase) -> bool {
        let changed = self.last != Some(phase);
        if changed {
            debug!(target: "table", "phase transition: {:?} -> {:?}", self.last, phase);
            self.last = Some(phase);
        }
        changed
    }

    pub fn current(&self) -> Option<TablePhase> {
        self.last
    }
}
