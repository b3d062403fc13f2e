//! capital-gains - Brazilian stock capital-gains tax calculator
//!
//! This library tracks a single running stock position at weighted average
//! cost, applies the R$20,000 monthly sale exemption and carries losses
//! forward, producing the tax owed for each buy/sell operation.

pub mod cli;
pub mod config;
pub mod error;
pub mod operations;
pub mod tax;
pub mod utils;

pub use error::{BatchError, LedgerError, ParseError};
pub use operations::{Operation, OperationKind, TaxResult};
pub use tax::{process_batch, process_batch_lenient, Portfolio};
