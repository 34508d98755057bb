//! Tabular outputs - the normalized table, the loan summary and their exports

pub mod builder;
pub mod focus;
pub mod writer;

pub use builder::{build_table, NormalizedTable, DATE_COLUMNS};
pub use focus::{build_focus_view, FocusColumn, FocusFilter, FocusRow, FocusView};
pub use writer::{ExportFormat, TableWriter, Tabular};
