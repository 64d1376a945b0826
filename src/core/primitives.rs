use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::{ChartError, ChartResult};

/// Number of fractional digits kept for stored scale factors.
pub const SCALE_PRECISION_DP: u32 = 10;

/// Number of fractional digits emitted for SVG coordinates.
pub const SVG_COORD_PRECISION_DP: u32 = 2;

/// Rounds `value` half-away-from-zero to `dp` fractional digits in decimal space.
///
/// Non-finite or out-of-range inputs are returned unchanged.
#[must_use]
pub fn round_to_decimals(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|decimal| {
            decimal.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|decimal| decimal.to_f64())
        .unwrap_or(value)
}

/// Formats a coordinate for SVG attributes: 2 decimals, trailing zeros trimmed.
#[must_use]
pub fn format_svg_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded = decimal
                .round_dp_with_strategy(
                    SVG_COORD_PRECISION_DP,
                    RoundingStrategy::MidpointAwayFromZero,
                )
                .normalize();
            if rounded.is_zero() {
                "0".to_owned()
            } else {
                rounded.to_string()
            }
        }
        None => format!("{value}"),
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` into RGBA bytes.
pub fn parse_hex_rgba(input: &str) -> ChartResult<[u8; 4]> {
    let invalid = || ChartError::InvalidData(format!("`{input}` is not a hex color"));
    let digits = input.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    match digits.len() {
        3 => {
            let mut rgba = [0, 0, 0, 255];
            for (slot, index) in rgba.iter_mut().zip(0..3) {
                let nibble = channel(index..index + 1)?;
                *slot = nibble * 17;
            }
            Ok(rgba)
        }
        6 => Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]),
        8 => Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?]),
        _ => Err(invalid()),
    }
}
