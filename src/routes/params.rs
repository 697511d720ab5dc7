use std::{fmt, str::FromStr};

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;

/// Quantity used when a request omits it or sends something unusable.
pub const DEFAULT_QUANTITY: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuantityAction {
    Increase,
    Decrease,
}

impl QuantityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityAction::Increase => "increase",
            QuantityAction::Decrease => "decrease",
        }
    }
}

impl fmt::Display for QuantityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantityAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(QuantityAction::Increase),
            "decrease" => Ok(QuantityAction::Decrease),
            _ => Err(AppError::bad_request("Missing or invalid parameters")),
        }
    }
}

/// Parse the leading integer of `raw`, e.g. `"3"`, `" 2 items"` or `"4.9"`.
///
/// Anything without a leading integer, or a result below 1, yields
/// [`DEFAULT_QUANTITY`].
pub fn parse_quantity(raw: &str) -> i32 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i32 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(10) else { break };
        seen_digit = true;
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as i32))
        {
            Some(v) => v,
            None => return DEFAULT_QUANTITY,
        };
    }

    if !seen_digit || negative || value < 1 {
        return DEFAULT_QUANTITY;
    }
    value
}

/// Quantity from a JSON body field that may be a number or a string.
pub fn quantity_from_value(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => i32::try_from(v)
                .ok()
                .filter(|v| *v >= 1)
                .unwrap_or(DEFAULT_QUANTITY),
            None => n
                .as_f64()
                .map(|f| parse_quantity(&f.trunc().to_string()))
                .unwrap_or(DEFAULT_QUANTITY),
        },
        Some(Value::String(s)) => parse_quantity(s),
        _ => DEFAULT_QUANTITY,
    }
}

/// Product id from a JSON body field; numbers are normalised to strings.
pub fn id_from_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(v), _) => Some(v.to_string()),
            (None, Some(v)) => Some(v.to_string()),
            _ => Some(n.to_string()),
        },
        _ => None,
    }
}

/// Price from a JSON body field; must be a finite, non-negative number.
pub fn price_from_value(value: Option<&Value>) -> Option<f64> {
    let price = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Non-blank string field or path segment.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
