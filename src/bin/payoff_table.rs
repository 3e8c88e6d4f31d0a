//! Payoff report for a block of loans loaded from CSV
//!
//! Pays off every loan standalone at its own configured payment (in
//! parallel), then pays the block down as one portfolio under a combined
//! payment, and optionally sweeps a range of combined payment levels.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use multiloan::money::money_amount;
use multiloan::{load_loans, MultiLoan, Payrange};

#[derive(Parser, Debug)]
#[command(name = "payoff_table", about = "Payoff schedules for a block of loans")]
struct Args {
    /// Path to the loan table (columns: principal,rate,payment)
    #[arg(long, default_value = "data/loans.csv")]
    loans: PathBuf,

    /// Combined payment per period for the portfolio payoff
    #[arg(long)]
    payment: f64,

    /// Low end of an optional combined-payment sweep
    #[arg(long)]
    sweep_low: Option<f64>,

    /// High end of an optional combined-payment sweep
    #[arg(long)]
    sweep_high: Option<f64>,

    /// Step between sweep levels
    #[arg(long, default_value_t = 100.0)]
    sweep_step: f64,

    /// Print sweep rows as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write the combined per-period history to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Standalone payoff outcome for one loan
struct LoanRow {
    principal: f64,
    rate: f64,
    payment: f64,
    total_paid: Option<f64>,
    payment_count: usize,
}

/// One sweep row for the JSON report
#[derive(Debug, Serialize)]
struct SweepRecord {
    amount: f64,
    total: f64,
    pct_change: f64,
    n_payments: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let loans = load_loans(&args.loans)
        .with_context(|| format!("loading loan table {}", args.loans.display()))?;
    println!("Loaded {} loans from {} in {:?}\n", loans.len(), args.loans.display(), start.elapsed());

    // Standalone payoff per loan, each at its own configured payment
    let rows: Vec<LoanRow> = loans
        .par_iter()
        .map(|loan| {
            let mut run = loan.clone();
            let result = run.pay_remaining(None);
            LoanRow {
                principal: loan.principal(),
                rate: loan.rate(),
                payment: loan.payment(),
                total_paid: result.is_ok().then(|| run.total_paid()),
                payment_count: run.payment_count(),
            }
        })
        .collect();

    println!("Standalone payoff per loan:");
    println!("{:>12} {:>8} {:>12} {:>14} {:>10}", "Principal", "Rate", "Payment", "Total Paid", "Payments");
    println!("{}", "-".repeat(60));
    for row in &rows {
        match row.total_paid {
            Some(total) => println!(
                "{:>12} {:>7.2}% {:>12} {:>14} {:>10}",
                money_amount(row.principal),
                row.rate * 100.0,
                money_amount(row.payment),
                money_amount(total),
                row.payment_count,
            ),
            None => println!(
                "{:>12} {:>7.2}% {:>12} {:>14} {:>10}",
                money_amount(row.principal),
                row.rate * 100.0,
                money_amount(row.payment),
                "diverges",
                "-",
            ),
        }
    }

    // Portfolio payoff under the combined payment
    let mut portfolio = MultiLoan::new(loans, args.payment)?;
    portfolio
        .pay_remaining(None)
        .with_context(|| format!("paying off portfolio at {}", money_amount(args.payment)))?;

    println!("\nPortfolio at {} combined:", money_amount(args.payment));
    println!("{}", portfolio);

    if let Some(path) = &args.output {
        write_history_csv(path, &portfolio)?;
        println!("\nCombined history written to: {}", path.display());
    }

    // Optional sweep across combined payment levels
    if let (Some(low), Some(high)) = (args.sweep_low, args.sweep_high) {
        let mut levels = Vec::new();
        let mut level = low;
        while level <= high {
            levels.push(level);
            level += args.sweep_step;
        }

        let sweep = Payrange::evaluate(&mut portfolio, &levels)?;
        let records: Vec<SweepRecord> = sweep
            .amounts()
            .iter()
            .zip(sweep.totals())
            .zip(sweep.payment_counts())
            .zip(sweep.pct_changes())
            .map(|(((amount, total), n_payments), pct_change)| SweepRecord {
                amount: *amount,
                total,
                pct_change,
                n_payments,
            })
            .collect();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            println!("\nCombined payment sweep ({} levels attempted):", levels.len());
            println!("{:>12} {:>14} {:>10} {:>12}", "Amount", "Total Paid", "Payments", "Pct Change");
            println!("{}", "-".repeat(52));
            for record in &records {
                println!(
                    "{:>12} {:>14} {:>10} {:>11.2}%",
                    money_amount(record.amount),
                    money_amount(record.total),
                    record.n_payments,
                    record.pct_change * 100.0,
                );
            }
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

/// Write the portfolio's per-period combined history as CSV
fn write_history_csv(path: &Path, portfolio: &MultiLoan) -> anyhow::Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating output file {}", path.display()))?;

    writeln!(file, "Period,Payment,Balance")?;
    for (period, (paid, balance)) in portfolio
        .payments()
        .iter()
        .zip(portfolio.balances())
        .enumerate()
    {
        writeln!(file, "{},{:.2},{:.2}", period, paid, balance)?;
    }
    Ok(())
}
