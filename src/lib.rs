pub mod config;
pub mod data;
pub mod engine;
pub mod logging;
pub mod timer;
pub mod ui;

pub use data::{CellValue, RowIdentity, TableDataSource};
pub use engine::actions::{ActionsConfig, MAX_ACTIONS, VISIBLE_ACTIONS};
pub use engine::columns::{ColumnSpec, ACTIONS_COLUMN_KEY};
pub use engine::pagination::{PageCursor, PageView};
pub use engine::row_state::RowStateMap;
pub use engine::table::{ExpansionConfig, TableComposer, TablePhase, TablePlan};
