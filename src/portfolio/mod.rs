//! Combined-payment allocation across multiple loans

pub mod allocation;
mod multiloan;

pub use multiloan::MultiLoan;
