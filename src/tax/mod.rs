// Tax module - Brazilian capital-gains rules for simple stock trades
// (average cost, R$20,000 sale exemption, loss carryforward)

pub mod cost_basis;
pub mod loss_carryforward;
pub mod swing_trade;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{BatchError, LedgerError};
use crate::operations::{Operation, OperationKind, TaxResult};
use crate::utils::format_currency;

pub use cost_basis::{AverageCostLedger, SaleCostBasis};
pub use loss_carryforward::AccumulatedLoss;
pub use swing_trade::{assess_sale, EXEMPTION_LIMIT, TAX_RATE};

/// Position plus loss carryforward for one batch of operations.
///
/// Operations must be applied in arrival order. Each batch gets its own value;
/// nothing is shared between batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portfolio {
    ledger: AverageCostLedger,
    accumulated_loss: AccumulatedLoss,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buy(&mut self, quantity: i64, unit_cost: Decimal) -> Result<TaxResult, LedgerError> {
        self.ledger.buy(quantity, unit_cost)?;
        Ok(TaxResult::zero())
    }

    /// Sell from the position and return the tax owed on the sale.
    ///
    /// On error neither the position nor the accumulated loss changes.
    pub fn sell(&mut self, quantity: i64, unit_cost: Decimal) -> Result<TaxResult, LedgerError> {
        let sale = self.ledger.sell(quantity, unit_cost)?;
        let tax = assess_sale(&mut self.accumulated_loss, sale.sale_total, sale.profit_loss);
        Ok(TaxResult::new(tax))
    }

    /// Apply one operation. Unrecognized kinds are skipped with a warning and
    /// owe no tax.
    pub fn apply(&mut self, operation: &Operation) -> Result<TaxResult, LedgerError> {
        match operation.kind() {
            Some(OperationKind::Buy) => self.buy(operation.quantity, operation.unit_cost),
            Some(OperationKind::Sell) => self.sell(operation.quantity, operation.unit_cost),
            None => {
                warn!("Unknown operation type '{}', skipping", operation.operation);
                Ok(TaxResult::zero())
            }
        }
    }

    pub fn total_shares(&self) -> i64 {
        self.ledger.total_shares()
    }

    pub fn average_cost(&self) -> Decimal {
        self.ledger.average_cost()
    }

    pub fn accumulated_loss(&self) -> Decimal {
        self.accumulated_loss.amount()
    }
}

/// Fold a batch over a fresh portfolio, stopping at the first rejected operation.
///
/// Returns one result per operation, in input order.
pub fn process_batch(operations: &[Operation]) -> Result<Vec<TaxResult>, BatchError> {
    process_batch_with(&mut Portfolio::new(), operations)
}

/// Like [`process_batch`], but against a caller-owned portfolio so its final
/// state can be inspected.
pub fn process_batch_with(
    portfolio: &mut Portfolio,
    operations: &[Operation],
) -> Result<Vec<TaxResult>, BatchError> {
    operations
        .iter()
        .enumerate()
        .map(|(i, op)| {
            debug!("Applying operation {}: {} {} @ {}", i + 1, op.operation, op.quantity, op.unit_cost);
            portfolio
                .apply(op)
                .map_err(|source| BatchError { index: i + 1, source })
        })
        .collect()
}

/// Fold a batch over a fresh portfolio, turning rejected operations into
/// zero-tax results. Rejected operations leave the portfolio untouched.
pub fn process_batch_lenient(operations: &[Operation]) -> Vec<TaxResult> {
    let mut portfolio = Portfolio::new();
    let results = operations
        .iter()
        .enumerate()
        .map(|(i, op)| match portfolio.apply(op) {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping operation {}: {}", i + 1, e);
                TaxResult::zero()
            }
        })
        .collect();

    debug!(
        "Batch finished with {} shares at {}, accumulated loss {}",
        portfolio.total_shares(),
        format_currency(portfolio.average_cost()),
        format_currency(portfolio.accumulated_loss())
    );
    results
}
