//! Commodity and price types.

use cashview_shared::types::{CommodityGuid, PriceGuid};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Namespace GnuCash uses for ISO 4217 currencies.
pub const CURRENCY_NAMESPACE: &str = "CURRENCY";

/// A unit of value: a currency or a tradeable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commodity {
    /// Commodity GUID.
    pub guid: CommodityGuid,
    /// `CURRENCY` for currencies, otherwise an exchange or user namespace.
    pub namespace: String,
    /// Short symbol (e.g. `EUR`, `AAPL`).
    pub mnemonic: String,
    /// Human-readable name.
    pub fullname: String,
    /// Smallest tradeable fraction, e.g. 100 for cents.
    pub fraction: i64,
}

impl Commodity {
    /// Creates a commodity with an empty full name and a fraction of 100.
    #[must_use]
    pub fn new(namespace: impl Into<String>, mnemonic: impl Into<String>) -> Self {
        Self {
            guid: CommodityGuid::new(),
            namespace: namespace.into(),
            mnemonic: mnemonic.into(),
            fullname: String::new(),
            fraction: 100,
        }
    }

    /// Creates a currency commodity.
    #[must_use]
    pub fn currency(mnemonic: impl Into<String>) -> Self {
        Self::new(CURRENCY_NAMESPACE, mnemonic)
    }

    /// Returns true for ISO 4217 currencies.
    #[must_use]
    pub fn is_currency(&self) -> bool {
        self.namespace == CURRENCY_NAMESPACE
    }
}

/// Price of one unit of `commodity` expressed in `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Price GUID.
    pub guid: PriceGuid,
    /// The priced commodity.
    pub commodity: CommodityGuid,
    /// The commodity the price is quoted in.
    pub currency: CommodityGuid,
    /// When the price was observed.
    pub date: NaiveDateTime,
    /// 1 `commodity` = `value` `currency`.
    pub value: Decimal,
    /// Where the price came from (`user:price`, `Finance::Quote`, ...).
    pub source: String,
}

impl Price {
    /// Creates a user-entered price.
    #[must_use]
    pub fn new(
        commodity: CommodityGuid,
        currency: CommodityGuid,
        date: NaiveDateTime,
        value: Decimal,
    ) -> Self {
        Self {
            guid: PriceGuid::new(),
            commodity,
            currency,
            date,
            value,
            source: "user:price".to_string(),
        }
    }

    /// Returns the value of one unit of `currency` in `commodity`.
    ///
    /// `None` for a zero price, which cannot be inverted.
    #[must_use]
    pub fn inverse_value(&self) -> Option<Decimal> {
        Decimal::ONE.checked_div(self.value)
    }
}
