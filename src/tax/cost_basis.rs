use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::utils::round_money;

/// Cost basis result for a sale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleCostBasis {
    /// `quantity * unit_cost`, rounded to cents
    pub sale_total: Decimal,
    /// `average_cost * quantity`, rounded to cents
    pub cost_basis: Decimal,
    /// Negative when the sale realized a loss
    pub profit_loss: Decimal,
}

/// Weighted-average-cost ledger for a single running position.
///
/// The average cost is stored already rounded to cents; sales price their
/// cost basis from that rounded figure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AverageCostLedger {
    total_shares: i64,
    average_cost: Decimal,
}

impl AverageCostLedger {
    pub fn new() -> Self {
        Self {
            total_shares: 0,
            average_cost: Decimal::ZERO,
        }
    }

    /// Add a purchase, recomputing the weighted average cost.
    pub fn buy(&mut self, quantity: i64, unit_cost: Decimal) -> Result<(), LedgerError> {
        ensure_positive(quantity)?;

        let overflow = || LedgerError::Overflow { quantity };
        let total_shares = self.total_shares.checked_add(quantity).ok_or_else(overflow)?;
        let held_value = Decimal::from(self.total_shares)
            .checked_mul(self.average_cost)
            .ok_or_else(overflow)?;
        let purchase_value = Decimal::from(quantity)
            .checked_mul(unit_cost)
            .ok_or_else(overflow)?;
        let average_cost = held_value
            .checked_add(purchase_value)
            .and_then(|value| value.checked_div(Decimal::from(total_shares)))
            .ok_or_else(overflow)?;

        self.total_shares = total_shares;
        self.average_cost = round_money(average_cost);

        Ok(())
    }

    /// Remove `quantity` shares sold at `unit_cost` and price the sale against the
    /// current average cost.
    pub fn sell(&mut self, quantity: i64, unit_cost: Decimal) -> Result<SaleCostBasis, LedgerError> {
        ensure_positive(quantity)?;

        if quantity > self.total_shares {
            return Err(LedgerError::InsufficientShares {
                requested: quantity,
                available: self.total_shares,
            });
        }

        let overflow = || LedgerError::Overflow { quantity };
        let sale_total = Decimal::from(quantity)
            .checked_mul(unit_cost)
            .map(round_money)
            .ok_or_else(overflow)?;
        let cost_basis = self
            .average_cost
            .checked_mul(Decimal::from(quantity))
            .map(round_money)
            .ok_or_else(overflow)?;
        let profit_loss = sale_total.checked_sub(cost_basis).ok_or_else(overflow)?;

        self.total_shares -= quantity;

        // Closing the position does not carry its cost into a later re-entry
        if self.total_shares == 0 {
            self.average_cost = Decimal::ZERO;
        }

        Ok(SaleCostBasis {
            sale_total,
            cost_basis,
            profit_loss,
        })
    }

    pub fn total_shares(&self) -> i64 {
        self.total_shares
    }

    pub fn average_cost(&self) -> Decimal {
        self.average_cost
    }
}

fn ensure_positive(quantity: i64) -> Result<(), LedgerError> {
    if quantity <= 0 {
        return Err(LedgerError::InvalidQuantity { quantity });
    }
    Ok(())
}
