//! Number formatting for the dashboard's total cards

use crate::{Amount, TxnCount};

/// The currency code amounts are shown in, unless configured otherwise
pub const DEFAULT_CURRENCY: &str = "MMK";

/// Inserts a `,` between every group of three digits, counted from the right
///
/// `digits` is expected to hold only ASCII digits.
pub fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats a transaction count as a thousands grouped integer, e.g. `12,345`
pub fn format_count(count: TxnCount) -> String {
    group_thousands(&count.to_string())
}

/// Formats an amount as `<currency> - <value>` with a thousands grouped value
/// and exactly two decimals, e.g. `MMK - 1,800.00`
///
/// The exact fixed point value is rounded to whole cents, ties to even.
/// Negative amounts keep their sign even when they round to zero.
pub fn format_amount(amount: Amount, currency: &str) -> String {
    let (whole, cents) = round_to_cents(amount);
    let sign = if amount < Amount::ZERO { "-" } else { "" };

    format!(
        "{currency} - {sign}{}.{cents:02}",
        group_thousands(&whole.to_string()),
    )
}

/// Splits the magnitude of an amount into its whole part and its rounded cents
///
/// Works on the raw bits, so the full range of [`Amount`] is covered without
/// scaling the value up first.
fn round_to_cents(amount: Amount) -> (u128, u128) {
    const FRAC_BITS: u32 = Amount::FRAC_NBITS;
    const FRAC_MASK: u128 = (1 << FRAC_BITS) - 1;
    const HALF: u128 = 1 << (FRAC_BITS - 1);

    let bits = amount.to_bits().unsigned_abs();
    let mut whole = bits >> FRAC_BITS;
    // frac < 2^64, so frac * 100 can't overflow
    let scaled = (bits & FRAC_MASK) * 100;
    let mut cents = scaled >> FRAC_BITS;
    let remainder = scaled & FRAC_MASK;

    if remainder > HALF || (remainder == HALF && cents % 2 == 1) {
        cents += 1;
    }
    if cents == 100 {
        whole += 1;
        cents = 0;
    }

    (whole, cents)
}
