use rust_decimal::Decimal;
use crate::types::ZakatError;

/// A wrapper around `Decimal` whose arithmetic reports `ZakatError::Overflow`
/// instead of panicking.
///
/// `context` names the quantity being computed so the error can say where
/// the overflow happened.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ZakatDecimal {
    pub value: Decimal,
    pub context: Option<String>,
}

impl ZakatDecimal {
    pub fn new(val: Decimal) -> Self {
        Self {
            value: val,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    fn overflow(&self, operation: &str) -> ZakatError {
        ZakatError::Overflow {
            operation: operation.to_string(),
            source_label: self.context.clone(),
        }
    }

    pub fn checked_add(self, other: impl Into<Decimal>) -> Result<Self, ZakatError> {
        match self.value.checked_add(other.into()) {
            Some(value) => Ok(Self { value, ..self }),
            None => Err(self.overflow("add")),
        }
    }

    pub fn checked_sub(self, other: impl Into<Decimal>) -> Result<Self, ZakatError> {
        match self.value.checked_sub(other.into()) {
            Some(value) => Ok(Self { value, ..self }),
            None => Err(self.overflow("sub")),
        }
    }

    pub fn checked_mul(self, other: impl Into<Decimal>) -> Result<Self, ZakatError> {
        match self.value.checked_mul(other.into()) {
            Some(value) => Ok(Self { value, ..self }),
            None => Err(self.overflow("mul")),
        }
    }

    pub fn into_inner(self) -> Decimal {
        self.value
    }
}

impl From<Decimal> for ZakatDecimal {
    fn from(d: Decimal) -> Self {
        Self::new(d)
    }
}

impl From<ZakatDecimal> for Decimal {
    fn from(val: ZakatDecimal) -> Self {
        val.value
    }
}

impl std::ops::Deref for ZakatDecimal {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/// Sums `values`, failing on overflow with `context` as the source label.
pub fn checked_sum<I>(values: I, context: &str) -> Result<Decimal, ZakatError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(ZakatDecimal::new(Decimal::ZERO).with_context(context), |acc, v| acc.checked_add(v))
        .map(ZakatDecimal::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_checked_chain() {
        let v = ZakatDecimal::new(dec!(100))
            .checked_mul(dec!(0.92))
            .and_then(|v| v.checked_add(dec!(8)))
            .and_then(|v| v.checked_sub(dec!(50)))
            .unwrap();
        assert_eq!(*v, dec!(50));
    }

    #[test]
    fn test_overflow_carries_context() {
        let err = ZakatDecimal::new(Decimal::MAX)
            .with_context("Gold")
            .checked_mul(dec!(2))
            .unwrap_err();
        assert_eq!(
            err,
            ZakatError::Overflow { operation: "mul".to_string(), source_label: Some("Gold".to_string()) }
        );
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([dec!(1), dec!(2.5), dec!(-0.5)], "test").unwrap(), dec!(3));
        assert!(checked_sum([Decimal::MAX, Decimal::MAX], "test").is_err());
    }
}
