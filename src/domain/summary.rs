use crate::domain::cart::CartLine;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Sales tax applied to the cart subtotal. Tips and fees are not taxed.
pub const TAX_RATE: Decimal = dec!(0.08);

/// Flat delivery fee charged on every order.
pub const DELIVERY_FEE: Decimal = dec!(3.99);

/// Derived financial totals for the order.
///
/// Never constructed or edited field-by-field outside this module:
/// [`OrderSummary::recompute`] is the only path that produces one, which is
/// what keeps `total == subtotal + delivery_fee + tax + tip` and
/// `tax == subtotal * TAX_RATE` true after every cart or tip mutation.
/// All amounts are exact decimals; rounding happens at presentation time.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub tip: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// An empty-cart summary: only the delivery fee is owed.
    pub fn initial(delivery_fee: Decimal) -> Self {
        Self::recompute(&[], delivery_fee, Decimal::ZERO)
    }

    /// Derives the full summary from the cart lines, fee and tip.
    pub fn recompute(lines: &[CartLine], delivery_fee: Decimal, tip: Decimal) -> Self {
        let subtotal: Decimal = lines
            .iter()
            .filter(|line| line.quantity > 0)
            .map(CartLine::line_total)
            .sum();
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            delivery_fee,
            tax,
            tip,
            total: subtotal + delivery_fee + tax + tip,
        }
    }
}
