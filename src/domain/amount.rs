use std::fmt;

/// Ledger amounts are fixed-point with seven decimal places.
/// 1 XLM = 10_000_000 stroops, so "50.0000000" = 500_000_000 stroops.
pub type Stroops = i64;

/// Number of decimal places carried by ledger amounts.
pub const AMOUNT_SCALE: usize = 7;

const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Format stroops as a decimal amount string.
/// Example: 100 -> "0.0000100", -10_000_000 -> "-1.0000000"
pub fn format_stroops(stroops: Stroops) -> String {
    let sign = if stroops < 0 { "-" } else { "" };
    let abs = stroops.unsigned_abs();
    let units = abs / STROOPS_PER_UNIT as u64;
    let remainder = abs % STROOPS_PER_UNIT as u64;
    format!("{}{}.{:07}", sign, units, remainder)
}

/// Parse a decimal amount string into stroops without going through floats.
/// Example: "50" -> 500_000_000, "0.0000001" -> 1, "12.5" -> 125_000_000
///
/// Digits beyond the seventh decimal place are accepted only when they are
/// zero; anything else cannot be represented on the ledger.
pub fn parse_stroops(input: &str) -> Result<Stroops, ParseAmountError> {
    let input = input.trim();
    let negative = input.starts_with('-');
    let input = input.trim_start_matches('-');

    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(ParseAmountError::InvalidFormat);
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseAmountError::Overflow)?
    };

    let (significant, excess) = if fraction.len() > AMOUNT_SCALE {
        fraction.split_at(AMOUNT_SCALE)
    } else {
        (fraction, "")
    };
    if excess.bytes().any(|b| b != b'0') {
        return Err(ParseAmountError::TooPrecise);
    }

    // Right-pad so "5" after the point means 5_000_000 stroops
    let padded = format!("{:0<width$}", significant, width = AMOUNT_SCALE);
    let fractional: i64 = padded.parse().map_err(|_| ParseAmountError::InvalidFormat)?;

    let stroops = units
        .checked_mul(STROOPS_PER_UNIT)
        .and_then(|s| s.checked_add(fractional))
        .ok_or(ParseAmountError::Overflow)?;
    Ok(if negative { -stroops } else { stroops })
}

/// True when the amount string denotes exactly zero.
/// Unparsable input is never considered zero.
pub fn is_zero_amount(input: &str) -> bool {
    matches!(parse_stroops(input), Ok(0))
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    TooPrecise,
    Overflow,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::TooPrecise => {
                write!(f, "amount has more than {} decimal places", AMOUNT_SCALE)
            }
            ParseAmountError::Overflow => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
