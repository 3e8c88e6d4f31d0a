//! Single-loan data structures and table loading

mod data;
pub mod loader;

pub use data::{Loan, DEFAULT_CADENCE, DEFAULT_COMPOUNDS, DEFAULT_STOP};
pub use loader::{load_default_loans, load_loans, load_loans_from_reader};
