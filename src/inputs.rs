//! Conversions from user-facing numeric types into `Decimal`.
//!
//! Two policies live here:
//! - [`IntoZakatDecimal`] is strict: a value that is not a finite number is an
//!   error. It is used where a typo must not silently become zero (prices).
//! - [`IntoAmount`] / [`parse_amount`] are forgiving: anything that is not a
//!   finite, non-negative number becomes `0`. This is the input policy for the
//!   27 declaration fields, which the engine must never reject.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;
use crate::types::ZakatError;

/// Trait for converting various types into `Decimal` for Zakat calculations.
///
/// This trait allows users to pass `i32`, `f64`, `&str`, etc. directly into
/// constructors without needing to wrap them in `dec!()` or `Decimal::from()`.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError>;
}

impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Ok(self)
    }
}

macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Decimal::from_f64(self as f64)
                        .ok_or_else(|| ZakatError::invalid_input("number", self, "not a finite number"))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        parse_decimal(self).ok_or_else(|| ZakatError::invalid_input("number", self, "not a valid number"))
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        self.as_str().into_zakat_decimal()
    }
}

/// Accepts plain (`"12.5"`) and scientific (`"1.2e3"`) notation.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Clamps a declared amount to the valid domain: negatives become zero.
pub fn sanitize_amount(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        tracing::debug!(%value, "negative amount coerced to zero");
        Decimal::ZERO
    } else {
        value
    }
}

/// Parse-or-default-zero for raw form input.
///
/// Blank text, text that is not a number, and negative numbers all yield `0`.
pub fn parse_amount(raw: &str) -> Decimal {
    if raw.trim().is_empty() {
        return Decimal::ZERO;
    }
    match parse_decimal(raw) {
        Some(value) => sanitize_amount(value),
        None => {
            tracing::debug!(raw, "unparseable amount coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Forgiving conversion into a declaration amount. Never fails.
pub trait IntoAmount {
    fn into_amount(self) -> Decimal;
}

impl<T: IntoZakatDecimal> IntoAmount for T {
    fn into_amount(self) -> Decimal {
        match self.into_zakat_decimal() {
            Ok(value) => sanitize_amount(value),
            Err(e) => {
                tracing::debug!(error = %e, "invalid amount coerced to zero");
                Decimal::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strict_conversions() {
        assert_eq!(60_i32.into_zakat_decimal().unwrap(), dec!(60));
        assert_eq!(0.8_f64.into_zakat_decimal().unwrap(), dec!(0.8));
        assert_eq!("12.50".into_zakat_decimal().unwrap(), dec!(12.5));
        assert_eq!("1.5e2".into_zakat_decimal().unwrap(), dec!(150));
        assert!("abc".into_zakat_decimal().is_err());
        assert!(f64::NAN.into_zakat_decimal().is_err());
        assert!(f64::INFINITY.into_zakat_decimal().is_err());
    }

    #[test]
    fn test_parse_amount_forgiving() {
        assert_eq!(parse_amount("1000"), dec!(1000));
        assert_eq!(parse_amount("  42.5 "), dec!(42.5));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12abc"), Decimal::ZERO);
        assert_eq!(parse_amount("-50"), Decimal::ZERO);
    }

    #[test]
    fn test_into_amount_forgiving() {
        assert_eq!(250_u32.into_amount(), dec!(250));
        assert_eq!((-3_i64).into_amount(), Decimal::ZERO);
        assert_eq!(f64::NAN.into_amount(), Decimal::ZERO);
        assert_eq!("n/a".into_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(sanitize_amount(dec!(-0)), Decimal::ZERO);
    }
}
