/// Fixed-point asset-string formatting.
///
/// Quantities are rendered in the chain's canonical textual encoding,
/// `"<fixed-point-value> <SYMBOL>"`. Values are truncated toward zero by
/// default — never rounded up — because overstating a quantity on-chain is
/// unsafe. There is no `f64` entry point to prevent accidental precision loss;
/// callers pass the quantity as a base-10 string.
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::TranseosError;

/// Rounding mode applied when a quantity carries more fractional digits than
/// the target currency allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Truncate toward zero. The mode used by every SDK operation.
    #[default]
    Down,
    /// Round away from zero.
    Up,
    /// Round half away from zero.
    HalfUp,
    /// Banker's rounding.
    HalfEven,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// The largest scale [`rust_decimal::Decimal`] can represent. Larger counts
/// would be capped silently, breaking the exact-fractional-width guarantee.
const MAX_DECIMAL_PLACES: u32 = 28;

/// Per-call formatting options.
///
/// The source library configured decimal places and rounding through a
/// process-wide arithmetic context; here the options are an explicit value so
/// concurrent calls cannot interfere with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountFormat {
    pub decimal_places: u32,
    pub rounding: Rounding,
}

impl AmountFormat {
    /// Truncating format with the given number of decimal places.
    pub fn with_decimals(decimal_places: u32) -> Self {
        Self {
            decimal_places,
            rounding: Rounding::Down,
        }
    }
}

/// Format a quantity into the canonical asset string.
///
/// The fractional part of the output carries exactly
/// `format.decimal_places` digits (zero-padded); a zero decimal-places count
/// yields an integral value with no decimal point.
pub fn format_amount(
    quantity: &str,
    format: AmountFormat,
    symbol: &str,
) -> Result<String, TranseosError> {
    if symbol.is_empty() {
        return Err(TranseosError::validation(
            "symbol",
            "Please provide a token symbol.",
        ));
    }
    if quantity.trim().is_empty() {
        return Err(TranseosError::validation(
            "quantity",
            "Please provide a quantity.",
        ));
    }
    if format.decimal_places > MAX_DECIMAL_PLACES {
        return Err(TranseosError::validation(
            "decimals",
            format!(
                "Decimal places must be at most {MAX_DECIMAL_PLACES}, got {}.",
                format.decimal_places
            ),
        ));
    }

    let parsed = Decimal::from_str(quantity).map_err(|e| {
        TranseosError::validation("quantity", format!("Invalid decimal '{quantity}': {e}"))
    })?;

    let mut value = parsed.round_dp_with_strategy(format.decimal_places, format.rounding.strategy());
    // Rescale only ever widens here, so it pads zeros without touching digits.
    value.rescale(format.decimal_places);

    Ok(format!("{value} {symbol}"))
}
