//! Multi-loan portfolio with rate-priority payment allocation

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::amortize::Amortize;
use crate::error::LoanError;
use crate::loan::{loader, Loan};
use crate::money::money_amount;

use super::allocation::{distribute_surplus, minimum_contributions};

/// A collection of loans paying down together under one combined recurring
/// payment.
///
/// Each period, every member's minimum contribution is covered first, then
/// the surplus flows to the highest-rate member, then the next, and so on.
/// All members share the same pay period. The portfolio keeps its own
/// combined balance/payment history in the same shape as a single
/// [`Loan`]'s: one entry per period, seeded with the sum of principals and a
/// zero payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLoan {
    loans: Vec<Loan>,
    /// Combined payment contributed across all loans per period
    payment: f64,
    /// Member indices in descending-rate order; ties keep construction order
    rate_order: Vec<usize>,
    /// Combined-balance ceiling: the sum of member stop thresholds
    stop: f64,
    balances: Vec<f64>,
    payments: Vec<f64>,
}

impl MultiLoan {
    /// Create a portfolio from explicit loans and a combined payment.
    ///
    /// Rejects an empty loan list.
    pub fn new(loans: Vec<Loan>, payment: f64) -> Result<Self, LoanError> {
        if loans.is_empty() {
            return Err(LoanError::Configuration(
                "a portfolio needs at least one loan".to_string(),
            ));
        }

        let mut rate_order: Vec<usize> = (0..loans.len()).collect();
        // Stable sort: equal rates keep their original relative order
        rate_order.sort_by(|&a, &b| {
            loans[b].rate().partial_cmp(&loans[a].rate()).unwrap_or(Ordering::Equal)
        });

        let initial: f64 = loans.iter().map(Loan::principal).sum();
        let stop: f64 = loans.iter().map(Loan::stop).sum();

        Ok(Self {
            loans,
            payment,
            rate_order,
            stop,
            balances: vec![initial],
            payments: vec![0.0],
        })
    }

    /// Create a portfolio from a CSV loan table (columns: principal, rate,
    /// payment) and a combined payment.
    pub fn from_csv<P: AsRef<Path>>(path: P, payment: f64) -> Result<Self, LoanError> {
        Self::new(loader::load_loans(path)?, payment)
    }

    /// Reset the portfolio and every member loan back to the initial state
    pub fn reset(&mut self) {
        for loan in &mut self.loans {
            loan.reset();
        }
        let initial: f64 = self.loans.iter().map(Loan::principal).sum();
        self.balances.clear();
        self.balances.push(initial);
        self.payments.clear();
        self.payments.push(0.0);
    }

    /// Current combined outstanding balance
    pub fn balance(&self) -> f64 {
        self.balances.last().copied().unwrap_or(0.0)
    }

    /// Sum of all combined payments made so far
    pub fn total_paid(&self) -> f64 {
        self.payments.iter().sum()
    }

    /// Number of combined payments made so far
    pub fn payment_count(&self) -> usize {
        self.payments.len() - 1
    }

    /// Combined balance history
    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    /// Combined payment history
    pub fn payments(&self) -> &[f64] {
        &self.payments
    }

    /// Configured combined recurring payment
    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Member loans, in construction order
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Per-member balance histories, in construction order
    pub fn member_balances(&self) -> Vec<&[f64]> {
        self.loans.iter().map(Loan::balances).collect()
    }

    /// Per-member payment histories, in construction order
    pub fn member_payments(&self) -> Vec<&[f64]> {
        self.loans.iter().map(Loan::payments).collect()
    }

    /// Per-member totals paid, in construction order
    pub fn member_totals(&self) -> Vec<f64> {
        self.loans.iter().map(Loan::total_paid).collect()
    }

    /// Advance every member loan by one period under the combined payment.
    ///
    /// Allocations are sized first without side effects (minimums, then the
    /// rate-ordered surplus walk), then applied for real through each
    /// member's own [`Loan::pay_one`]. Fails with
    /// [`LoanError::InsufficientPayment`], before any member is touched,
    /// when the combined amount does not cover the sum of member minimums.
    pub fn pay_one(&mut self, amount: Option<f64>) -> Result<(), LoanError> {
        let combined = amount.unwrap_or(self.payment);
        let minimums = minimum_contributions(&self.loans);
        let allocations = distribute_surplus(&self.loans, &self.rate_order, &minimums, combined)?;

        for (loan, allocation) in self.loans.iter_mut().zip(&allocations) {
            loan.pay_one(Some(*allocation));
        }

        let paid: f64 = self
            .loans
            .iter()
            .map(|loan| loan.payments().last().copied().unwrap_or(0.0))
            .sum();
        let balance: f64 = self.loans.iter().map(Loan::balance).sum();
        self.payments.push(paid);
        self.balances.push(balance);
        Ok(())
    }

    /// Repeat [`pay_one`](Self::pay_one) until the combined balance reaches
    /// zero.
    ///
    /// Guards against non-convergence: fails with [`LoanError::Exhausted`]
    /// when the combined balance runs past the portfolio stop threshold, or
    /// when a period leaves every member balance unchanged (the schedule has
    /// stalled and would repeat forever). Completed periods stay recorded.
    pub fn pay_remaining(&mut self, amount: Option<f64>) -> Result<(), LoanError> {
        let combined = amount.unwrap_or(self.payment);
        while self.balance() > 0.0 {
            if self.balance() > self.stop {
                return Err(LoanError::Exhausted { payment: combined, stop: self.stop });
            }
            self.pay_one(Some(combined))?;
            if self.balance() > 0.0 && self.stalled() {
                return Err(LoanError::Exhausted { payment: combined, stop: self.stop });
            }
        }
        Ok(())
    }

    /// True when the last period changed no member balance: the same inputs
    /// would recur on every later period
    fn stalled(&self) -> bool {
        self.loans.iter().all(|loan| {
            let balances = loan.balances();
            match balances.len() {
                0 | 1 => true,
                len => balances[len - 1] == balances[len - 2],
            }
        })
    }
}

impl Amortize for MultiLoan {
    fn pay_one(&mut self, amount: Option<f64>) -> Result<(), LoanError> {
        MultiLoan::pay_one(self, amount)
    }

    fn pay_remaining(&mut self, amount: Option<f64>) -> Result<(), LoanError> {
        MultiLoan::pay_remaining(self, amount)
    }

    fn reset(&mut self) {
        MultiLoan::reset(self);
    }

    fn balance(&self) -> f64 {
        MultiLoan::balance(self)
    }

    fn total_paid(&self) -> f64 {
        MultiLoan::total_paid(self)
    }

    fn payment_count(&self) -> usize {
        MultiLoan::payment_count(self)
    }

    fn member_totals(&self) -> Vec<f64> {
        MultiLoan::member_totals(self)
    }
}

impl fmt::Display for MultiLoan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loans: {}", self.loans.len())?;
        writeln!(f, "Combined balance: {}", money_amount(self.balance()))?;
        writeln!(f, "Combined payment: {}", money_amount(self.payment))?;
        writeln!(f, "Total amount paid: {}", money_amount(self.total_paid()))?;
        write!(f, "Number of payments: {}", self.payment_count())
    }
}
