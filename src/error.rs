//! Error types for amortization runs

use thiserror::Error;

use crate::money::money_amount;

/// Everything that can go wrong while building or paying down loans.
///
/// Failures are raised synchronously at the point of detection and nothing is
/// rolled back: a payoff run that fails mid-way keeps every period completed
/// before the failure in its history.
#[derive(Debug, Error)]
pub enum LoanError {
    /// A portfolio was constructed from unusable inputs
    #[error("invalid loan configuration: {0}")]
    Configuration(String),

    /// The divergence guard tripped: the balance ran past the stop threshold
    /// (or stopped moving entirely), so the schedule will never terminate
    #[error(
        "payments of {} have led the balance to reach the stopping criteria of {}",
        money_amount(*.payment),
        money_amount(*.stop)
    )]
    Exhausted {
        /// Per-period payment that failed to keep up with accrued interest
        payment: f64,
        /// Configured stop threshold
        stop: f64,
    },

    /// A combined payment does not cover the sum of member minimums
    #[error(
        "combined payment of {} does not cover the {} minimum due across all loans",
        money_amount(*.supplied),
        money_amount(*.required)
    )]
    InsufficientPayment {
        /// Combined amount offered for the period
        supplied: f64,
        /// Sum of every member's minimum contribution
        required: f64,
    },

    /// Every candidate level in a payment sweep was rejected
    #[error("none of the {attempted} candidate payment amounts could pay off the balance")]
    NoViableAmount {
        /// Number of levels attempted
        attempted: usize,
    },

    /// The loan table could not be read or parsed
    #[error("failed to read loan table: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_names_both_amounts() {
        let err = LoanError::Exhausted { payment: 1.0, stop: 1e6 };
        let msg = err.to_string();
        assert!(msg.contains("$1.00"), "message was: {msg}");
        assert!(msg.contains("$1,000,000.00"), "message was: {msg}");
    }

    #[test]
    fn test_insufficient_payment_message_names_both_amounts() {
        let err = LoanError::InsufficientPayment { supplied: 500.0, required: 900.0 };
        let msg = err.to_string();
        assert!(msg.contains("$500.00"), "message was: {msg}");
        assert!(msg.contains("$900.00"), "message was: {msg}");
    }
}
