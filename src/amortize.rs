//! Shared payment interface for single loans and portfolios

use crate::error::LoanError;

/// Operations common to a single [`Loan`](crate::Loan) and a
/// [`MultiLoan`](crate::MultiLoan) portfolio.
///
/// This is the seam the sweep layer drives: it only needs to reset a target,
/// pay it down at a candidate level, and read the resulting totals, without
/// caring whether one balance or many sit behind the calls.
pub trait Amortize {
    /// Advance exactly one payment period, using the configured payment when
    /// `amount` is `None`. `Some(0.0)` is an explicit zero payment.
    fn pay_one(&mut self, amount: Option<f64>) -> Result<(), LoanError>;

    /// Repeat one-period steps until the balance reaches exactly zero
    fn pay_remaining(&mut self, amount: Option<f64>) -> Result<(), LoanError>;

    /// Clear payment history back to the initial state, keeping configuration
    fn reset(&mut self);

    /// Current outstanding balance
    fn balance(&self) -> f64;

    /// Sum of all payments made so far
    fn total_paid(&self) -> f64;

    /// Number of payments made so far
    fn payment_count(&self) -> usize;

    /// Per-member totals paid; empty for a single loan
    fn member_totals(&self) -> Vec<f64> {
        Vec::new()
    }
}
