//! Operation and tax result records, and the JSON line framing around them.
//!
//! Each input line is one JSON array of operations; each output line is one
//! JSON array of `{"tax": ...}` records in the same order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::utils::to_money;

/// Known operation kinds. Anything else is carried as raw text and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Buy,
    Sell,
}

impl OperationKind {
    /// Case-sensitive: only `"buy"` and `"sell"` are recognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buy" => Some(OperationKind::Buy),
            "sell" => Some(OperationKind::Sell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Buy => "buy",
            OperationKind::Sell => "sell",
        }
    }
}

/// One buy/sell instruction as read from the input feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub operation: String,
    #[serde(
        rename = "unit-cost",
        default,
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    pub unit_cost: Decimal,
    #[serde(default)]
    pub quantity: i64,
}

impl Operation {
    pub fn new(kind: OperationKind, unit_cost: Decimal, quantity: i64) -> Self {
        Self {
            operation: kind.as_str().to_string(),
            unit_cost,
            quantity,
        }
    }

    pub fn kind(&self) -> Option<OperationKind> {
        OperationKind::parse(&self.operation)
    }
}

/// Tax owed for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax: Decimal,
}

impl TaxResult {
    /// Stored at cent scale so it serializes as `0.00`, `1000.00`, ...
    pub fn new(tax: Decimal) -> Self {
        Self { tax: to_money(tax) }
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }
}

/// Parse one input line into its batch of operations.
///
/// A `null` line is an empty batch. `line_number` is 1-based and only used
/// to label the error.
pub fn parse_batch(line: &str, line_number: usize) -> Result<Vec<Operation>, ParseError> {
    serde_json::from_str::<Option<Vec<Operation>>>(line)
        .map(Option::unwrap_or_default)
        .map_err(|source| ParseError {
            line: line_number,
            source,
        })
}

/// Serialize one batch of results as a single JSON array (no trailing newline).
pub fn format_results(results: &[TaxResult]) -> serde_json::Result<String> {
    serde_json::to_string(results)
}
