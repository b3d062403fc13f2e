//! Error handling for capital-gains
//!
//! Defines the typed errors raised by the position ledger and the batch
//! processor, and establishes a unified Result type using anyhow for
//! context chaining at the I/O boundary.

use thiserror::Error;

/// Errors raised while applying a single operation to a position.
///
/// The position is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient shares: attempt to sell {requested}, but only {available} held")]
    InsufficientShares { requested: i64, available: i64 },

    #[error("invalid quantity {quantity}: quantity must be greater than zero")]
    InvalidQuantity { quantity: i64 },

    #[error("amount overflow: operation on {quantity} shares exceeds the representable range")]
    Overflow { quantity: i64 },
}

/// A ledger error tagged with the 1-based position of the operation in its batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("operation {index} rejected: {source}")]
pub struct BatchError {
    pub index: usize,
    #[source]
    pub source: LedgerError,
}

/// Input framing errors: the line could not be parsed as an operation array.
#[derive(Error, Debug)]
#[error("malformed input on line {line}: {source}")]
pub struct ParseError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Result type alias for process-level operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = LedgerError::InsufficientShares {
            requested: 100,
            available: 50,
        };
        assert_eq!(
            err.to_string(),
            "insufficient shares: attempt to sell 100, but only 50 held"
        );
    }

    #[test]
    fn test_batch_error_names_operation() {
        let err = BatchError {
            index: 3,
            source: LedgerError::InvalidQuantity { quantity: 0 },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("operation 3 rejected"));
        assert!(msg.contains("invalid quantity 0"));
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> = Err(anyhow::Error::new(LedgerError::InvalidQuantity {
            quantity: -1,
        }))
        .context("failed to process batch");
        match result {
            Err(e) => {
                assert!(e.to_string().contains("failed to process batch"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("invalid quantity -1"));
                assert!(e.downcast_ref::<LedgerError>().is_some());
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_parse_error_carries_line() {
        let source = serde_json::from_str::<Vec<u8>>("[1,").unwrap_err();
        let err = ParseError { line: 7, source };
        assert!(err.to_string().starts_with("malformed input on line 7"));
    }
}
