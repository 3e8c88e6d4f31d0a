//! Multiloan CLI
//!
//! Demo driver: pays off a sample loan and a sample portfolio, then sweeps a
//! range of combined payment levels

use multiloan::money::money_amount;
use multiloan::{Loan, MultiLoan, Payrange};

fn main() {
    env_logger::init();

    println!("Multiloan v0.1.0");
    println!("================\n");

    // Single loan: $10,000 at 5% annual, compounding daily, paying $200/month
    let mut loan = Loan::new(10_000.0, 0.05, 200.0);

    println!("Loan:");
    println!("  Principal: {}", money_amount(loan.principal()));
    println!("  Rate: {:.2}% annual, compounding daily", loan.rate() * 100.0);
    println!("  Payment: {}/month", money_amount(loan.payment()));
    println!();

    loan.pay_remaining(None).expect("payment covers accrued interest");

    println!("Payoff schedule ({} payments):", loan.payment_count());
    println!("{:>7} {:>14} {:>14}", "Period", "Payment", "Balance");
    println!("{}", "-".repeat(37));

    // Print the first 12 periods to console
    for (period, (paid, balance)) in loan
        .payments()
        .iter()
        .zip(loan.balances())
        .enumerate()
        .skip(1)
        .take(12)
    {
        println!(
            "{:>7} {:>14} {:>14}",
            period,
            money_amount(*paid),
            money_amount(*balance)
        );
    }
    if loan.payment_count() > 12 {
        println!("... ({} more periods)", loan.payment_count() - 12);
    }

    println!("\nSummary:");
    println!("{}\n", loan);

    // Portfolio: three loans sharing one $800/month combined payment
    let loans = vec![
        Loan::new(5000.0, 0.065, 100.0),
        Loan::new(15_000.0, 0.055, 150.0),
        Loan::new(30_000.0, 0.045, 250.0),
    ];
    let mut portfolio = MultiLoan::new(loans, 800.0).expect("non-empty portfolio");

    portfolio
        .pay_remaining(None)
        .expect("combined payment covers accrued interest");

    println!("Portfolio payoff:");
    println!("{:>6} {:>12} {:>10} {:>14} {:>10}", "Loan", "Principal", "Rate", "Total Paid", "Payments");
    println!("{}", "-".repeat(56));
    for (i, member) in portfolio.loans().iter().enumerate() {
        println!(
            "{:>6} {:>12} {:>9.2}% {:>14} {:>10}",
            i + 1,
            money_amount(member.principal()),
            member.rate() * 100.0,
            money_amount(member.total_paid()),
            member.payment_count(),
        );
    }
    println!("\n{}\n", portfolio);

    // Sweep: what does the payoff cost at different combined payment levels?
    let levels = [600.0, 800.0, 1000.0, 1200.0];
    let sweep = Payrange::evaluate(&mut portfolio, &levels).expect("at least one viable level");

    println!("Combined payment sweep:");
    println!("{:>12} {:>14} {:>10} {:>12}", "Amount", "Total Paid", "Payments", "Pct Change");
    println!("{}", "-".repeat(52));
    let pct_changes = sweep.pct_changes();
    for (((amount, total), count), pct) in sweep
        .amounts()
        .iter()
        .zip(sweep.totals())
        .zip(sweep.payment_counts())
        .zip(pct_changes)
    {
        println!(
            "{:>12} {:>14} {:>10} {:>11.2}%",
            money_amount(*amount),
            money_amount(total),
            count,
            pct * 100.0,
        );
    }
}
