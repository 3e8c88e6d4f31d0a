//! Load loans from a delimited table
//!
//! The table carries one row per loan with numeric `principal`, `rate`, and
//! `payment` columns (no currency symbols or separators). Loaded loans get
//! the default compounding terms.

use std::path::Path;

use csv::Reader;

use super::Loan;
use crate::error::LoanError;

/// Default path to the loan table
pub const DEFAULT_LOANS_PATH: &str = "data/loans.csv";

/// Raw CSV row matching the loan table columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    principal: f64,
    rate: f64,
    payment: f64,
}

impl CsvRow {
    fn to_loan(self) -> Loan {
        Loan::new(self.principal, self.rate, self.payment)
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<Loan>, LoanError> {
    let mut reader = Reader::from_path(path)?;
    let mut loans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.to_loan());
    }

    Ok(loans)
}

/// Load loans from any reader (e.g. string buffer, network stream)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Loan>, LoanError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut loans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.to_loan());
    }

    Ok(loans)
}

/// Load loans from the default data/loans.csv location
pub fn load_default_loans() -> Result<Vec<Loan>, LoanError> {
    load_loans(DEFAULT_LOANS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "principal,rate,payment\n10000,0.05,200\n25000.50,0.045,350\n";

    #[test]
    fn test_load_from_reader() {
        let loans = load_loans_from_reader(SAMPLE.as_bytes()).expect("well-formed table");

        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].principal(), 10_000.0);
        assert_eq!(loans[0].payment(), 200.0);
        assert_eq!(loans[1].principal(), 25_000.50);
        assert_eq!(loans[1].rate(), 0.045);
    }

    #[test]
    fn test_non_numeric_row_is_rejected() {
        let bad = "principal,rate,payment\nabc,0.05,200\n";
        let result = load_loans_from_reader(bad.as_bytes());

        assert!(matches!(result, Err(LoanError::Csv(_))));
    }

    #[test]
    fn test_load_default_loans() {
        let loans = load_default_loans().expect("failed to load data/loans.csv");

        assert!(!loans.is_empty());
        for loan in &loans {
            assert!(loan.principal() > 0.0);
            assert!(loan.rate() >= 0.0);
        }
    }
}
