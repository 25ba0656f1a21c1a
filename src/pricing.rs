//! Pricing

use rusty_money::{Money, iso::Currency};

use crate::cart::CartLine;

/// Price of a line: unit price times quantity.
pub fn line_total<'a>(line: &CartLine<'a>) -> Money<'a, Currency> {
    let minor_units = line
        .unit_price()
        .to_minor_units()
        .saturating_mul(i64::from(line.quantity()));

    Money::from_minor(minor_units, line.unit_price().currency())
}

/// Calculates the total cost of a list of lines.
///
/// Sums in minor units and saturates rather than overflowing. Rounding for
/// display is left to the caller.
pub fn total_cost<'a>(lines: &[CartLine<'a>], currency: &'static Currency) -> Money<'a, Currency> {
    let minor_units = lines
        .iter()
        .map(|line| line_total(line).to_minor_units())
        .fold(0, i64::saturating_add);

    Money::from_minor(minor_units, currency)
}
