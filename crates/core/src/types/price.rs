//! Money arithmetic using decimal values.
//!
//! All monetary amounts in the system are [`rust_decimal::Decimal`] and
//! travel over the wire as JSON strings (`"149.90"`), never floats. Totals
//! are always recomputed from line data, never cached.

use rust_decimal::Decimal;

/// Subtotal for a single line: `unit_price * quantity`.
#[must_use]
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Total over `(unit_price, quantity)` pairs.
///
/// Pure summation; order of the lines does not affect the result.
#[must_use]
pub fn cart_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .map(|(price, qty)| line_subtotal(price, qty))
        .sum()
}

/// Format an amount for display with two decimal places (`R$ 150.00`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("R$ {:.2}", amount.round_dp(2))
}
