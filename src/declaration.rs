//! The user's declared assets as an immutable value.
//!
//! Every one of the 27 categories is always present; a category that was never
//! entered is `0`. Edits do not mutate in place: `with_amount` and `with_raw`
//! return a new declaration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::category::AssetCategory;
use crate::inputs::{IntoAmount, parse_amount};
use crate::types::ZakatError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, RawAmount>",
    into = "BTreeMap<AssetCategory, Decimal>"
)]
pub struct AssetDeclaration {
    amounts: [Decimal; AssetCategory::COUNT],
}

impl AssetDeclaration {
    /// A declaration with every category at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: AssetCategory) -> Decimal {
        self.amounts[category.index()]
    }

    /// Returns a copy with `category` replaced by `amount`.
    ///
    /// Values that are not finite non-negative numbers become `0`.
    #[must_use]
    pub fn with_amount(mut self, category: AssetCategory, amount: impl IntoAmount) -> Self {
        self.amounts[category.index()] = amount.into_amount();
        self
    }

    /// Returns a copy with `category` set from raw form text (parse-or-zero).
    #[must_use]
    pub fn with_raw(self, category: AssetCategory, raw: &str) -> Self {
        self.with_amount(category, parse_amount(raw))
    }

    /// Builds a declaration from `(key, raw text)` pairs, as a form submits them.
    ///
    /// Field values are forgiving; field keys are not, since an unknown key
    /// means the caller and the engine disagree on the category set.
    pub fn from_raw_fields<I, K, V>(fields: I) -> Result<Self, ZakatError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        fields.into_iter().try_fold(Self::new(), |decl, (key, raw)| {
            let category = AssetCategory::from_str(key.as_ref())?;
            Ok(decl.with_raw(category, raw.as_ref()))
        })
    }

    /// All categories with their amounts, in declaration-form order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, Decimal)> + '_ {
        AssetCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Categories with a non-zero amount.
    pub fn non_zero(&self) -> impl Iterator<Item = (AssetCategory, Decimal)> + '_ {
        self.iter().filter(|(_, amount)| !amount.is_zero())
    }

    pub fn is_empty(&self) -> bool {
        self.non_zero().next().is_none()
    }
}

/// A field value as it may appear in a JSON/TOML declaration file.
///
/// Anything that is not a number ends up as `0`, matching form input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(Decimal),
    Text(String),
    Other(serde_json::Value),
}

impl RawAmount {
    fn into_amount(self) -> Decimal {
        match self {
            RawAmount::Number(value) => value.into_amount(),
            RawAmount::Text(text) => parse_amount(&text),
            RawAmount::Other(value) => {
                tracing::debug!(%value, "non-numeric field value coerced to zero");
                Decimal::ZERO
            }
        }
    }
}

impl TryFrom<BTreeMap<String, RawAmount>> for AssetDeclaration {
    type Error = ZakatError;

    fn try_from(fields: BTreeMap<String, RawAmount>) -> Result<Self, Self::Error> {
        fields.into_iter().try_fold(Self::new(), |decl, (key, raw)| {
            let category = AssetCategory::from_str(&key)?;
            Ok(decl.with_amount(category, raw.into_amount()))
        })
    }
}

impl From<AssetDeclaration> for BTreeMap<AssetCategory, Decimal> {
    fn from(decl: AssetDeclaration) -> Self {
        decl.iter().collect()
    }
}

impl FromIterator<(AssetCategory, Decimal)> for AssetDeclaration {
    fn from_iter<T: IntoIterator<Item = (AssetCategory, Decimal)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |decl, (category, amount)| decl.with_amount(category, amount))
    }
}
