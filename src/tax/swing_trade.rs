use rust_decimal::Decimal;
use tracing::debug;

use super::loss_carryforward::AccumulatedLoss;
use crate::utils::{format_currency, round_money};

/// Sales totalling up to this amount (inclusive) are exempt.
pub const EXEMPTION_LIMIT: Decimal = Decimal::from_parts(2_000_000, 0, 0, false, 2);

/// 20% on net profit of taxable sales.
pub const TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Decide the tax owed on one sale and update the loss carryforward.
///
/// Exempt sales owe nothing but still move the accumulated loss. Taxable sales
/// offset the profit against the accumulated loss before the rate applies.
pub fn assess_sale(loss: &mut AccumulatedLoss, sale_total: Decimal, profit: Decimal) -> Decimal {
    if is_exempt(sale_total) {
        loss.record_exempt(profit);
        debug!(
            "Exempt sale of {} (profit {}), accumulated loss now {}",
            format_currency(sale_total),
            format_currency(profit),
            format_currency(loss.amount())
        );
        return Decimal::ZERO;
    }

    let net_profit = loss.apply_to_profit(profit);
    let tax_due = round_money(net_profit * TAX_RATE);
    debug!(
        "Taxable sale of {} (profit {}, net {}), tax {}, accumulated loss now {}",
        format_currency(sale_total),
        format_currency(profit),
        format_currency(net_profit),
        format_currency(tax_due),
        format_currency(loss.amount())
    );
    tax_due
}

pub fn is_exempt(sale_total: Decimal) -> bool {
    sale_total <= EXEMPTION_LIMIT
}
