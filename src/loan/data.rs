//! Single-loan amortization

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amortize::Amortize;
use crate::error::LoanError;
use crate::interest::apply_single_payment;
use crate::money::money_amount;

/// Default compounding events per rate unit (daily within an annual rate)
pub const DEFAULT_COMPOUNDS: u32 = 365;

/// Default payment cadence (monthly within an annual rate)
pub const DEFAULT_CADENCE: f64 = 1.0 / 12.0;

/// Default stop threshold guarding against non-converging schedules
pub const DEFAULT_STOP: f64 = 1e6;

/// A single amortizing loan.
///
/// Configuration is fixed at construction; the mutable state is a pair of
/// append-only histories: balances (seeded with the principal) and payments
/// (seeded with a zero sentinel, which is not counted as a real payment).
/// The two histories always have the same length.
///
/// Defaults model an annual rate compounding daily with monthly payments:
///
/// ```
/// use multiloan::Loan;
///
/// // $10,000 at 5% annual, paying $200/month
/// let mut loan = Loan::new(10_000.0, 0.05, 200.0);
/// loan.pay_one(None);
/// assert_eq!(loan.payment_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Original principal
    principal: f64,
    /// Interest rate per rate unit (e.g. 0.05 for 5% annual)
    rate: f64,
    /// Recurring payment per period
    payment: f64,
    /// Compounding events per rate unit
    n: u32,
    /// Payment cadence as a fraction of the rate unit
    t: f64,
    /// Balance ceiling that converts a runaway schedule into an error
    stop: f64,
    /// Balance after each period, seeded with the principal
    balances: Vec<f64>,
    /// Payment applied each period, seeded with a zero sentinel
    payments: Vec<f64>,
}

impl Loan {
    /// Create a loan with the default terms: daily compounding of an annual
    /// rate, monthly payments, and a $1,000,000 stop threshold.
    pub fn new(principal: f64, rate: f64, payment: f64) -> Self {
        Self::with_terms(principal, rate, payment, DEFAULT_COMPOUNDS, DEFAULT_CADENCE, DEFAULT_STOP)
    }

    /// Create a loan with explicit compounding count, cadence, and stop
    /// threshold.
    pub fn with_terms(principal: f64, rate: f64, payment: f64, n: u32, t: f64, stop: f64) -> Self {
        Self {
            principal,
            rate,
            payment,
            n,
            t,
            stop,
            balances: vec![principal],
            payments: vec![0.0],
        }
    }

    /// Restore the histories to their initial state. Configuration is
    /// untouched.
    pub fn reset(&mut self) {
        self.balances.clear();
        self.balances.push(self.principal);
        self.payments.clear();
        self.payments.push(0.0);
    }

    /// Current outstanding balance
    pub fn balance(&self) -> f64 {
        self.balances.last().copied().unwrap_or(self.principal)
    }

    /// Sum of all payments made so far
    pub fn total_paid(&self) -> f64 {
        self.payments.iter().sum()
    }

    /// Number of payments made so far (the seed zero is not a payment)
    pub fn payment_count(&self) -> usize {
        self.payments.len() - 1
    }

    /// Balance history, one entry per period plus the initial principal
    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    /// Payment history, one entry per period plus the zero seed
    pub fn payments(&self) -> &[f64] {
        &self.payments
    }

    /// Original principal
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Interest rate per rate unit
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Configured recurring payment
    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Configured stop threshold
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Size one period's payment without applying it.
    ///
    /// Returns `(new_balance, actual_payment)` exactly as a real payment of
    /// `desired` would, but leaves the loan untouched. The portfolio
    /// allocator probes loans with this when deciding how much surplus each
    /// can absorb.
    pub fn preview_payment(&self, desired: f64) -> (f64, f64) {
        apply_single_payment(desired, self.balance(), self.rate, self.n, self.t)
    }

    /// Accrue one period of interest and apply a single payment, appending
    /// the result to the histories.
    ///
    /// Uses the configured recurring payment when `amount` is `None`;
    /// `Some(0.0)` is an explicit zero payment. Once the balance is zero this
    /// appends zero-valued periods and changes nothing else.
    pub fn pay_one(&mut self, amount: Option<f64>) {
        let desired = amount.unwrap_or(self.payment);
        let (balance, paid) = self.preview_payment(desired);
        self.balances.push(balance);
        self.payments.push(paid);
    }

    /// Pay down the remaining balance to exactly zero, appending every
    /// intermediate period.
    ///
    /// Fails with [`LoanError::Exhausted`] at the first period whose
    /// resulting balance exceeds the stop threshold (payment too small
    /// relative to accrued interest), or at a period that makes no progress
    /// at all (zero rate with zero payment). The failing period is not
    /// recorded; everything before it stays in the history.
    pub fn pay_remaining(&mut self, amount: Option<f64>) -> Result<(), LoanError> {
        let desired = amount.unwrap_or(self.payment);
        while self.balance() > 0.0 {
            let previous = self.balance();
            let (balance, paid) = self.preview_payment(desired);
            // A balance past the threshold, or one that stopped moving, can
            // never reach zero
            if balance > self.stop || balance == previous {
                return Err(LoanError::Exhausted { payment: desired, stop: self.stop });
            }
            self.balances.push(balance);
            self.payments.push(paid);
        }
        Ok(())
    }
}

impl Amortize for Loan {
    fn pay_one(&mut self, amount: Option<f64>) -> Result<(), LoanError> {
        Loan::pay_one(self, amount);
        Ok(())
    }

    fn pay_remaining(&mut self, amount: Option<f64>) -> Result<(), LoanError> {
        Loan::pay_remaining(self, amount)
    }

    fn reset(&mut self) {
        Loan::reset(self);
    }

    fn balance(&self) -> f64 {
        Loan::balance(self)
    }

    fn total_paid(&self) -> f64 {
        Loan::total_paid(self)
    }

    fn payment_count(&self) -> usize {
        Loan::payment_count(self)
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original principal: {}", money_amount(self.principal))?;
        writeln!(f, "Current balance: {}", money_amount(self.balance()))?;
        writeln!(f, "Payment amount: {}", money_amount(self.payment))?;
        writeln!(f, "Total amount paid: {}", money_amount(self.total_paid()))?;
        write!(f, "Number of payments: {}", self.payment_count())
    }
}
