//! Sizing half of the combined-payment split
//!
//! Pure functions only: these decide how much of one period's combined
//! payment each loan receives, without touching any loan state. The mutating
//! application lives in [`MultiLoan::pay_one`](super::MultiLoan::pay_one),
//! which replays the chosen allocations through each loan's own payment path.

use crate::error::LoanError;
use crate::interest::bounded_payment;
use crate::loan::Loan;

/// Minimum cash each loan must receive this period: the lesser of its
/// configured payment and its current balance.
///
/// Balances here are pre-compounding: the minimum states the cash
/// commitment, not the post-interest amount.
pub fn minimum_contributions(loans: &[Loan]) -> Vec<f64> {
    loans
        .iter()
        .map(|loan| bounded_payment(loan.balance(), loan.payment()))
        .collect()
}

/// Split `combined` across the loans for one period: minimums first, then
/// the surplus to loans in `order` (descending rate, ties in construction
/// order).
///
/// Each loan in the walk is probed with its would-be payment of
/// `remaining + its current allocation`; the probe accounts for that loan's
/// own interest accrual, so a loan near zero absorbs no more than its
/// compounded balance and the rest of the surplus flows on to the next loan.
///
/// Fails with [`LoanError::InsufficientPayment`] when `combined` does not
/// cover the sum of minimums. Never mutates the loans.
pub fn distribute_surplus(
    loans: &[Loan],
    order: &[usize],
    minimums: &[f64],
    combined: f64,
) -> Result<Vec<f64>, LoanError> {
    let required: f64 = minimums.iter().sum();
    if combined < required {
        return Err(LoanError::InsufficientPayment { supplied: combined, required });
    }

    let mut allocations = minimums.to_vec();
    let mut remaining = combined - required;

    for &i in order {
        if remaining <= 0.0 {
            break;
        }
        let (_, actual) = loans[i].preview_payment(remaining + allocations[i]);
        remaining -= actual - allocations[i];
        allocations[i] = actual;
    }

    Ok(allocations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_minimums_are_bounded_by_balance() {
        let loans = vec![Loan::new(30.0, 0.05, 50.0), Loan::new(1000.0, 0.05, 50.0)];
        assert_eq!(minimum_contributions(&loans), vec![30.0, 50.0]);
    }

    #[test]
    fn test_insufficient_combined_payment_is_rejected() {
        let loans = vec![Loan::new(1000.0, 0.05, 50.0), Loan::new(1000.0, 0.05, 50.0)];
        let minimums = minimum_contributions(&loans);
        let result = distribute_surplus(&loans, &[0, 1], &minimums, 80.0);

        match result {
            Err(LoanError::InsufficientPayment { supplied, required }) => {
                assert_eq!(supplied, 80.0);
                assert_eq!(required, 100.0);
            }
            other => panic!("expected InsufficientPayment, got {other:?}"),
        }
    }

    #[test]
    fn test_surplus_flows_to_highest_rate_loan() {
        let loans = vec![Loan::new(1000.0, 0.10, 50.0), Loan::new(1000.0, 0.01, 50.0)];
        let minimums = minimum_contributions(&loans);
        let allocations = distribute_surplus(&loans, &[0, 1], &minimums, 300.0).unwrap();

        // The high-rate loan can absorb the whole surplus
        assert_eq!(allocations, vec![250.0, 50.0]);
    }

    #[test]
    fn test_nearly_paid_loan_absorbs_only_its_compounded_balance() {
        let loans = vec![Loan::new(10.0, 0.10, 50.0), Loan::new(1000.0, 0.01, 50.0)];
        let minimums = minimum_contributions(&loans);
        let allocations = distribute_surplus(&loans, &[0, 1], &minimums, 500.0).unwrap();

        // First loan takes its compounded balance, overflow lands on the next
        assert_abs_diff_eq!(allocations[0], 10.08, epsilon = 1e-9);
        assert_abs_diff_eq!(allocations[1], 489.92, epsilon = 1e-9);
        assert_abs_diff_eq!(allocations.iter().sum::<f64>(), 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_rates_keep_construction_order() {
        let loans = vec![Loan::new(1000.0, 0.05, 0.0), Loan::new(1000.0, 0.05, 0.0)];
        let minimums = minimum_contributions(&loans);
        let allocations = distribute_surplus(&loans, &[0, 1], &minimums, 100.0).unwrap();

        assert_eq!(allocations, vec![100.0, 0.0]);
    }
}
