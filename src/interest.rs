//! Compounding and payment arithmetic
//!
//! Pure functions shared by the single-loan amortizer and the portfolio
//! allocator. Balances compound as `A = P * (1 + r/n)^(n*t)`, sampling
//! continuous-style growth at each payment boundary.

use crate::money::round_currency;

/// Balance after accruing interest for one payment period.
///
/// `rate` is the interest rate per rate unit, `n` the number of compounding
/// events per rate unit, and `t` the payment cadence as a fraction of the
/// rate unit. Total for all non-negative inputs with `n != 0`.
pub fn compound(balance: f64, rate: f64, n: u32, t: f64) -> f64 {
    balance * (1.0 + rate / n as f64).powf(n as f64 * t)
}

/// The amount actually paid against a balance: whichever is less.
///
/// Never drives the balance negative and never exceeds the offered amount.
pub fn bounded_payment(balance: f64, desired: f64) -> f64 {
    balance.min(desired)
}

/// Accrue one period of interest, then apply a bounded payment.
///
/// Returns `(new_balance, actual_payment)`, both rounded to cents. If
/// `desired` covers the whole compounded balance the new balance is exactly
/// zero and the payment equals the compounded balance. Rounding happens only
/// here so that compounding itself stays at full precision.
pub fn apply_single_payment(desired: f64, balance: f64, rate: f64, n: u32, t: f64) -> (f64, f64) {
    let accrued = compound(balance, rate, n, t);
    let paid = bounded_payment(accrued, desired);
    (round_currency(accrued - paid), round_currency(paid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const MONTHLY: f64 = 1.0 / 12.0;

    #[test]
    fn test_compound_zero_rate_is_identity() {
        assert_eq!(compound(1000.0, 0.0, 365, MONTHLY), 1000.0);
    }

    #[test]
    fn test_compound_approaches_continuous_limit() {
        // Daily compounding of an annual rate is close to e^(r*t)
        let accrued = compound(1000.0, 0.05, 365, MONTHLY);
        assert_relative_eq!(accrued, 1000.0 * (0.05 * MONTHLY).exp(), max_relative = 1e-4);
        assert!(accrued > 1000.0);
    }

    #[test]
    fn test_bounded_payment() {
        assert_eq!(bounded_payment(1000.0, 200.0), 200.0);
        assert_eq!(bounded_payment(150.0, 200.0), 150.0);
        assert_eq!(bounded_payment(0.0, 200.0), 0.0);
    }

    #[test]
    fn test_overpayment_zeroes_balance_exactly() {
        let (balance, paid) = apply_single_payment(2000.0, 1000.0, 0.05, 365, MONTHLY);
        assert_eq!(balance, 0.0);
        assert_eq!(paid, round_currency(compound(1000.0, 0.05, 365, MONTHLY)));
        assert_abs_diff_eq!(paid, 1004.18, epsilon = 0.005);
    }

    #[test]
    fn test_partial_payment_rounds_to_cents() {
        let (balance, paid) = apply_single_payment(100.0, 1000.0, 0.05, 365, MONTHLY);
        assert_eq!(paid, 100.0);
        assert_eq!(balance, round_currency(balance));
        assert_abs_diff_eq!(balance, 904.18, epsilon = 0.005);
    }

    #[test]
    fn test_zero_balance_is_inert() {
        let (balance, paid) = apply_single_payment(100.0, 0.0, 0.05, 365, MONTHLY);
        assert_eq!(balance, 0.0);
        assert_eq!(paid, 0.0);
    }
}
