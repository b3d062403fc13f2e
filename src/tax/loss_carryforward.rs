use rust_decimal::Decimal;

/// Running balance of unrecovered losses, carried forward across sales.
///
/// Never negative. Profits consume it, losses grow it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulatedLoss(Decimal);

impl AccumulatedLoss {
    pub fn new() -> Self {
        Self(Decimal::ZERO)
    }

    /// Start from an existing balance; negative inputs clamp to zero.
    pub fn with_balance(amount: Decimal) -> Self {
        Self(amount.max(Decimal::ZERO))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Record the result of an exempt sale.
    ///
    /// A profit consumes the balance (floored at zero); a loss or breakeven adds
    /// its magnitude.
    pub fn record_exempt(&mut self, profit: Decimal) {
        if profit > Decimal::ZERO {
            self.0 = self.0.saturating_sub(profit).max(Decimal::ZERO);
        } else {
            self.0 = self.0.saturating_add(-profit);
        }
    }

    /// Offset a taxable sale's result against the balance, returning the net
    /// profit left to tax.
    ///
    /// `balance - profit` covers both signs: a negative profit grows the balance.
    pub fn apply_to_profit(&mut self, profit: Decimal) -> Decimal {
        let net_profit = profit.saturating_sub(self.0).max(Decimal::ZERO);
        self.0 = self.0.saturating_sub(profit).max(Decimal::ZERO);
        net_profit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exempt_profit_reduces_loss() {
        let mut loss = AccumulatedLoss::with_balance(dec!(100));
        loss.record_exempt(dec!(50));
        assert_eq!(loss.amount(), dec!(50));
    }

    #[test]
    fn test_exempt_profit_exceeds_loss() {
        let mut loss = AccumulatedLoss::with_balance(dec!(100));
        loss.record_exempt(dec!(150));
        assert_eq!(loss.amount(), Decimal::ZERO);
    }

    #[test]
    fn test_exempt_loss_increases_loss() {
        let mut loss = AccumulatedLoss::with_balance(dec!(100));
        loss.record_exempt(dec!(-50));
        assert_eq!(loss.amount(), dec!(150));
    }

    #[test]
    fn test_exempt_breakeven_keeps_loss() {
        let mut loss = AccumulatedLoss::with_balance(dec!(100));
        loss.record_exempt(Decimal::ZERO);
        assert_eq!(loss.amount(), dec!(100));
    }

    #[test]
    fn test_taxable_profit_partially_offset() {
        let mut loss = AccumulatedLoss::with_balance(dec!(25000));
        let net = loss.apply_to_profit(dec!(30000));
        assert_eq!(net, dec!(5000));
        assert_eq!(loss.amount(), Decimal::ZERO);
    }

    #[test]
    fn test_taxable_profit_fully_absorbed() {
        let mut loss = AccumulatedLoss::with_balance(dec!(40000));
        let net = loss.apply_to_profit(dec!(20000));
        assert_eq!(net, Decimal::ZERO);
        assert_eq!(loss.amount(), dec!(20000));
    }

    #[test]
    fn test_taxable_loss_grows_balance() {
        let mut loss = AccumulatedLoss::with_balance(dec!(1000));
        let net = loss.apply_to_profit(dec!(-25000));
        assert_eq!(net, Decimal::ZERO);
        assert_eq!(loss.amount(), dec!(26000));
    }

    #[test]
    fn test_huge_losses_saturate() {
        let mut loss = AccumulatedLoss::with_balance(Decimal::MAX);
        loss.record_exempt(dec!(-1));
        assert_eq!(loss.amount(), Decimal::MAX);

        let net = loss.apply_to_profit(Decimal::MIN);
        assert_eq!(net, Decimal::ZERO);
        assert_eq!(loss.amount(), Decimal::MAX);
    }

    #[test]
    fn test_with_balance_clamps_negative() {
        assert_eq!(AccumulatedLoss::with_balance(dec!(-5)).amount(), Decimal::ZERO);
    }
}
