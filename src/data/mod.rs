//! Data layer
//!
//! Value vocabulary for cell accessors and the collaborator traits the
//! engine consumes rows through.

pub mod cell_value;
pub mod provider;

pub use cell_value::CellValue;
pub use provider::{RowIdentity, TableDataSource};
