//! Demo applications for the Jaffolding shell
//!
//! All app logic is host-testable: the calculator is a state machine over
//! its display string, the table and chart are pure models, and the sales
//! module carries the record type plus the offline fallback dataset.
//! [`launcher::default_apps`] produces the registrations the shell feeds
//! to its app manager.

pub mod calculator;
pub mod chart;
pub mod launcher;
pub mod sales;
pub mod table;

pub use calculator::{Calculator, Operator};
pub use chart::{Chart, ChartKind, Dataset};
pub use launcher::default_apps;
pub use sales::{fallback_dataset, SalesRecord};
pub use table::{ColumnType, DataTable, Row};
