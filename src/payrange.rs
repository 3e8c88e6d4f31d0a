//! Sweep a range of payment levels over a loan or portfolio
//!
//! Answers "how much will I ultimately pay if I contribute $X each period?"
//! for a whole range of X: each candidate level gets a fresh payoff run, and
//! the results line up as one table. Levels whose schedule diverges (or, for
//! a portfolio, fails to cover the member minimums) are skipped with a
//! warning rather than failing the sweep.

use serde::Serialize;

use crate::amortize::Amortize;
use crate::error::LoanError;
use crate::money::money_amount;

/// Totals recorded for an accepted payment level
#[derive(Debug, Clone, Serialize)]
pub struct LevelSummary {
    /// Total amount paid over the life of the schedule
    pub total_paid: f64,
    /// Number of payments the schedule took
    pub payment_count: usize,
    /// Per-member totals when sweeping a portfolio; empty for a single loan
    pub member_totals: Vec<f64>,
}

/// Outcome of one candidate payment level
#[derive(Debug)]
pub enum LevelOutcome {
    /// The level paid the balance off; totals recorded
    Paid(LevelSummary),
    /// The level was rejected; the error that rejected it is kept
    Skipped(LoanError),
}

/// One row of a sweep: a candidate level and what happened to it
#[derive(Debug)]
pub struct LevelRow {
    /// Candidate combined payment per period
    pub amount: f64,
    /// What the payoff run at this level produced
    pub outcome: LevelOutcome,
}

/// Results of sweeping candidate payment levels over an amortization target.
///
/// ```no_run
/// use multiloan::{Loan, Payrange};
///
/// let mut loan = Loan::new(10_000.0, 0.05, 200.0);
/// let sweep = Payrange::evaluate(&mut loan, &[200.0, 500.0, 1000.0])?;
/// for (amount, total) in sweep.amounts().iter().zip(sweep.totals()) {
///     println!("{amount}: {total}");
/// }
/// # Ok::<(), multiloan::LoanError>(())
/// ```
#[derive(Debug)]
pub struct Payrange {
    rows: Vec<LevelRow>,
}

impl Payrange {
    /// Reset the target and pay it off once per candidate level.
    ///
    /// A level rejected with [`LoanError::Exhausted`] or
    /// [`LoanError::InsufficientPayment`] becomes a
    /// [`LevelOutcome::Skipped`] row and a `warn!` log line; any other error
    /// aborts the sweep. Fails with [`LoanError::NoViableAmount`] when no
    /// level survives. The target is left reset afterwards.
    pub fn evaluate<A: Amortize>(target: &mut A, levels: &[f64]) -> Result<Self, LoanError> {
        let mut rows = Vec::with_capacity(levels.len());

        for &amount in levels {
            target.reset();
            let outcome = match target.pay_remaining(Some(amount)) {
                Ok(()) => LevelOutcome::Paid(LevelSummary {
                    total_paid: target.total_paid(),
                    payment_count: target.payment_count(),
                    member_totals: target.member_totals(),
                }),
                Err(err @ (LoanError::Exhausted { .. } | LoanError::InsufficientPayment { .. })) => {
                    log::warn!("skipping payment level {}: {}", money_amount(amount), err);
                    LevelOutcome::Skipped(err)
                }
                Err(err) => return Err(err),
            };
            rows.push(LevelRow { amount, outcome });
        }
        target.reset();

        if !rows.iter().any(|row| matches!(row.outcome, LevelOutcome::Paid(_))) {
            return Err(LoanError::NoViableAmount { attempted: levels.len() });
        }

        Ok(Self { rows })
    }

    /// Every candidate level's row, accepted and skipped alike
    pub fn rows(&self) -> &[LevelRow] {
        &self.rows
    }

    /// Accepted payment levels, in sweep order
    pub fn amounts(&self) -> Vec<f64> {
        self.accepted().map(|(amount, _)| amount).collect()
    }

    /// Total paid at each accepted level
    pub fn totals(&self) -> Vec<f64> {
        self.accepted().map(|(_, summary)| summary.total_paid).collect()
    }

    /// Number of payments at each accepted level
    pub fn payment_counts(&self) -> Vec<usize> {
        self.accepted().map(|(_, summary)| summary.payment_count).collect()
    }

    /// First-difference percent change in totals across accepted levels,
    /// with a trailing zero for the last level
    pub fn pct_changes(&self) -> Vec<f64> {
        let totals = self.totals();
        totals
            .iter()
            .enumerate()
            .map(|(i, &total)| match totals.get(i + 1) {
                Some(next) => (next - total) / total,
                None => 0.0,
            })
            .collect()
    }

    fn accepted(&self) -> impl Iterator<Item = (f64, &LevelSummary)> {
        self.rows.iter().filter_map(|row| match &row.outcome {
            LevelOutcome::Paid(summary) => Some((row.amount, summary)),
            LevelOutcome::Skipped(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::Loan;
    use crate::portfolio::MultiLoan;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_diverging_level_is_skipped() {
        // Monthly interest on $100,000 at 5% is ~$417: $100 diverges, $1,000 pays off
        let mut loan = Loan::new(100_000.0, 0.05, 200.0);
        let sweep = Payrange::evaluate(&mut loan, &[100.0, 1000.0]).unwrap();

        assert_eq!(sweep.rows().len(), 2);
        assert!(matches!(
            sweep.rows()[0].outcome,
            LevelOutcome::Skipped(LoanError::Exhausted { .. })
        ));
        assert!(matches!(sweep.rows()[1].outcome, LevelOutcome::Paid(_)));
        assert_eq!(sweep.amounts(), vec![1000.0]);
        assert_eq!(sweep.totals().len(), 1);
        assert!(sweep.payment_counts()[0] > 0);
        assert_eq!(sweep.pct_changes(), vec![0.0]);
    }

    #[test]
    fn test_all_levels_rejected() {
        let mut loan = Loan::new(100_000.0, 0.05, 200.0);
        let result = Payrange::evaluate(&mut loan, &[10.0, 20.0]);

        assert!(matches!(result, Err(LoanError::NoViableAmount { attempted: 2 })));
    }

    #[test]
    fn test_target_is_left_reset() {
        let mut loan = Loan::new(10_000.0, 0.05, 200.0);
        Payrange::evaluate(&mut loan, &[200.0, 500.0]).unwrap();

        assert_eq!(loan.balance(), 10_000.0);
        assert_eq!(loan.payment_count(), 0);
    }

    #[test]
    fn test_pct_changes_are_first_differences() {
        let mut loan = Loan::new(10_000.0, 0.05, 200.0);
        let sweep = Payrange::evaluate(&mut loan, &[200.0, 500.0]).unwrap();

        let totals = sweep.totals();
        let pct = sweep.pct_changes();
        assert_eq!(pct.len(), 2);
        assert_abs_diff_eq!(pct[0], (totals[1] - totals[0]) / totals[0], epsilon = 1e-12);
        assert_eq!(pct[1], 0.0);
        // Paying more per period costs less overall
        assert!(totals[1] < totals[0]);
        assert!(pct[0] < 0.0);
    }

    #[test]
    fn test_portfolio_sweep_records_member_totals() {
        let loans = vec![Loan::new(1000.0, 0.10, 50.0), Loan::new(2000.0, 0.05, 100.0)];
        let mut portfolio = MultiLoan::new(loans, 300.0).unwrap();
        let sweep = Payrange::evaluate(&mut portfolio, &[300.0]).unwrap();

        match &sweep.rows()[0].outcome {
            LevelOutcome::Paid(summary) => {
                assert_eq!(summary.member_totals.len(), 2);
                let member_sum: f64 = summary.member_totals.iter().sum();
                assert_abs_diff_eq!(member_sum, summary.total_paid, epsilon = 1e-6);
            }
            other => panic!("expected Paid, got {other:?}"),
        }
    }

    #[test]
    fn test_portfolio_level_below_minimums_is_skipped() {
        let loans = vec![Loan::new(1000.0, 0.05, 50.0), Loan::new(1000.0, 0.05, 100.0)];
        let mut portfolio = MultiLoan::new(loans, 400.0).unwrap();
        let sweep = Payrange::evaluate(&mut portfolio, &[100.0, 400.0]).unwrap();

        assert!(matches!(
            sweep.rows()[0].outcome,
            LevelOutcome::Skipped(LoanError::InsufficientPayment { .. })
        ));
        assert_eq!(sweep.amounts(), vec![400.0]);
    }
}
