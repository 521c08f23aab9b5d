//! Money arithmetic helpers using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted
//! to `f64` only at model boundaries. Display formatting strips trailing
//! zeros (`12.50` → `"12.5"`, `12.00` → `"12"`).

use rust_decimal::prelude::*;

use crate::error::SettleError;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance when comparing a computed remainder to zero (1e-6)
pub const AMOUNT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `require_finite()` at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent corruption of monetary math.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_amount(value).to_f64().unwrap_or_default()
}

/// Round a monetary value to 2 decimal places, half away from zero
#[inline]
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two monetary values for equality within `AMOUNT_EPSILON`
#[inline]
pub fn amounts_equal(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < AMOUNT_EPSILON
}

/// Format a monetary value for display, trailing zeros stripped
pub fn format_decimal(value: Decimal) -> String {
    round_amount(value).normalize().to_string()
}

/// Format an f64 monetary value for display, trailing zeros stripped
pub fn format_amount(value: f64) -> String {
    format_decimal(to_decimal(value))
}

/// Validate that an f64 value is finite (not NaN, not Infinity)
#[inline]
pub(crate) fn require_finite(value: f64, field_name: &str) -> Result<(), SettleError> {
    if !value.is_finite() {
        return Err(SettleError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Parse the keypad's free-form entered amount into a positive Decimal.
///
/// Tolerates the in-progress forms the keypad can produce (a trailing
/// or leading decimal point); rejects empty, non-numeric, non-positive
/// and out-of-bounds amounts.
pub fn parse_entered_amount(raw: &str) -> Result<Decimal, SettleError> {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(SettleError::InvalidAmount);
    }
    let normalized = if trimmed.starts_with('.') {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    };
    let value = normalized
        .parse::<Decimal>()
        .map_err(|_| SettleError::InvalidAmount)?;
    if value <= Decimal::ZERO || value > to_decimal(MAX_PAYMENT_AMOUNT) {
        return Err(SettleError::InvalidAmount);
    }
    Ok(value)
}
