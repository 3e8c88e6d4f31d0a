//! Multiloan - Debt amortization engine with rate-priority payment allocation
//!
//! This library provides:
//! - Compounding and bounded-payment arithmetic
//! - Single-loan payoff schedules with a divergence guard
//! - Combined-payment allocation across a loan portfolio by descending rate
//! - Payment-level sweeps with typed per-level outcomes
//! - CSV loan-table loading and currency formatting

pub mod amortize;
pub mod error;
pub mod interest;
pub mod loan;
pub mod money;
pub mod payrange;
pub mod portfolio;

// Re-export commonly used types
pub use amortize::Amortize;
pub use error::LoanError;
pub use loan::{load_loans, load_loans_from_reader, Loan};
pub use payrange::{LevelOutcome, LevelRow, LevelSummary, Payrange};
pub use portfolio::MultiLoan;
