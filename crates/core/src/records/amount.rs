//! Lenient decoding of monetary amounts.
//!
//! Backend payloads are not trusted: amounts may arrive as numbers, numeric strings,
//! `null`, or garbage. Anything that is not a non-negative number decodes to zero.
//! Magnitudes are capped at [`MAX_AMOUNT`] so that sums over realistic record
//! counts stay inside the decimal range.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Largest amount a single record or setting may carry: one quadrillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Clamps an amount to `0..=MAX_AMOUNT`.
#[must_use]
pub fn sanitize(amount: Decimal) -> Decimal {
    if amount.is_sign_negative() {
        Decimal::ZERO
    } else {
        amount.min(MAX_AMOUNT)
    }
}

/// Clamps a signed amount to `-MAX_AMOUNT..=MAX_AMOUNT`.
#[must_use]
pub fn clamp_signed(amount: Decimal) -> Decimal {
    amount.clamp(-MAX_AMOUNT, MAX_AMOUNT)
}

/// Sums amounts, saturating at the decimal range instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Parses a decimal from text, accepting plain and scientific notation.
#[must_use]
pub fn parse(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

/// Coerces an arbitrary JSON value into a signed decimal, zero when not numeric.
#[must_use]
pub fn coerce_signed(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse(&n.to_string()),
        Value::String(s) => parse(s),
        _ => None,
    }
    .map_or(Decimal::ZERO, clamp_signed)
}

/// Coerces an arbitrary JSON value into a non-negative decimal.
#[must_use]
pub fn coerce(value: &Value) -> Decimal {
    sanitize(coerce_signed(value))
}

/// `deserialize_with` helper for non-negative amount fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(&value))
}

/// `deserialize_with` helper for signed fields such as an opening balance.
pub fn deserialize_signed<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_signed(&value))
}
