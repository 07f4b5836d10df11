//! Declarative macros for the closed set of asset categories.
//!
//! `asset_categories!` turns one table (variant, key, group, valuation, label)
//! into the `AssetCategory` enum and its lookup tables, so the key list and
//! the valuation rules cannot drift apart.

/// Generates the `AssetCategory` enum from a declarative table.
///
/// # Usage
///
/// ```rust,ignore
/// asset_categories! {
///     /// 24 karat gold, by weight.
///     Gold24 => "gold24", Gold, Valuation::Weighed { metal: Metal::Gold, purity: PURITY_24K }, "Gold 24 karat";
/// }
/// ```
///
/// This generates:
/// - The enum, serialized by its key (`#[serde(rename = key)]`)
/// - `ALL` (declaration order) and `COUNT`
/// - `key()`, `group()`, `valuation()`, `label()`
/// - `FromStr` (unknown key -> `ZakatError::UnknownCategory`) and `Display`
macro_rules! asset_categories {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $key:tt, $group:ident, $valuation:expr, $label:literal;
        )*
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum AssetCategory {
            $(
                $(#[$meta])*
                #[serde(rename = $key)]
                $variant,
            )*
        }

        impl AssetCategory {
            /// Every category, in declaration-form order.
            pub const ALL: &'static [AssetCategory] = &[$(AssetCategory::$variant,)*];

            pub const COUNT: usize = Self::ALL.len();

            /// The stable field key, e.g. `"savingsAccount"`.
            pub fn key(&self) -> &'static str {
                match self {
                    $(AssetCategory::$variant => $key,)*
                }
            }

            pub fn group(&self) -> $crate::category::AssetGroup {
                match self {
                    $(AssetCategory::$variant => $crate::category::AssetGroup::$group,)*
                }
            }

            pub fn valuation(&self) -> $crate::category::Valuation {
                match self {
                    $(AssetCategory::$variant => $valuation,)*
                }
            }

            /// English form label, including the expected unit.
            pub fn label(&self) -> &'static str {
                match self {
                    $(AssetCategory::$variant => $label,)*
                }
            }
        }

        impl ::std::str::FromStr for AssetCategory {
            type Err = $crate::types::ZakatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($key => Ok(AssetCategory::$variant),)*
                    other => Err($crate::types::ZakatError::UnknownCategory(other.to_string())),
                }
            }
        }

        impl ::std::fmt::Display for AssetCategory {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}
