//! Compact currency formatting for dashboard cells (e.g. `£2.4B`, `£200M`).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DEFAULT_CURRENCY_SYMBOL;

const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Formats an amount with the default currency symbol.
///
/// See [`format_currency_with_symbol`] for the scaling rules.
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_symbol(value, DEFAULT_CURRENCY_SYMBOL)
}

/// Formats an amount as `<symbol><signed scaled value><unit>`.
///
/// Units are picked on the absolute, unrounded value:
/// - `>= 1e9`: one decimal place, `B`
/// - `>= 1e6`: no decimals, `M`
/// - `>= 1e3`: no decimals, `K`
/// - otherwise the value itself with trailing zeros removed
///
/// Midpoints round away from zero, so `1_500` gives `£2K` and `-1_500`
/// gives `£-2K`. The sign follows the symbol (`£-1M`).
pub fn format_currency_with_symbol(value: Decimal, symbol: &str) -> String {
    let magnitude = value.abs();

    if magnitude >= BILLION {
        format!("{}{:.1}B", symbol, scale(value, BILLION, 1))
    } else if magnitude >= MILLION {
        format!("{}{:.0}M", symbol, scale(value, MILLION, 0))
    } else if magnitude >= THOUSAND {
        format!("{}{:.0}K", symbol, scale(value, THOUSAND, 0))
    } else {
        format!("{}{}", symbol, value.normalize())
    }
}

fn scale(value: Decimal, unit: Decimal, decimal_places: u32) -> Decimal {
    (value / unit).round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}
