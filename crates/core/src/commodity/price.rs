//! Price lookup.
//!
//! Conversion factors come from the most recent price of a commodity pair,
//! quoted either way round. There is no search through intermediate
//! commodities, and a commodity never has a price in itself.

use std::collections::HashMap;

use cashview_shared::types::CommodityGuid;
use rust_decimal::Decimal;

use super::types::Price;

/// Returns the most recent price, or `None` for an empty list.
///
/// When several prices share the latest date the last one wins.
pub fn latest_price<'a, I>(prices: I) -> Option<&'a Price>
where
    I: IntoIterator<Item = &'a Price>,
{
    prices.into_iter().max_by_key(|price| price.date)
}

/// All prices of a book, indexed by (commodity, currency).
#[derive(Debug, Clone, Default)]
pub struct PriceDb {
    prices: Vec<Price>,
    latest: HashMap<(CommodityGuid, CommodityGuid), usize>,
}

impl PriceDb {
    /// Indexes `prices`, remembering the most recent one of each pair.
    #[must_use]
    pub fn new(prices: Vec<Price>) -> Self {
        let mut latest: HashMap<(CommodityGuid, CommodityGuid), usize> = HashMap::new();
        for (idx, price) in prices.iter().enumerate() {
            latest
                .entry((price.commodity, price.currency))
                .and_modify(|current| {
                    if price.date >= prices[*current].date {
                        *current = idx;
                    }
                })
                .or_insert(idx);
        }
        Self { prices, latest }
    }

    /// Number of prices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if there are no prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterates all prices in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Price> {
        self.prices.iter()
    }

    /// Most recent price of `commodity` quoted in `currency`.
    #[must_use]
    pub fn quote(&self, commodity: CommodityGuid, currency: CommodityGuid) -> Option<&Price> {
        self.latest
            .get(&(commodity, currency))
            .map(|idx| &self.prices[*idx])
    }

    /// Factor converting an amount of `from` into `to`.
    ///
    /// A direct quote wins over an inverted one.
    #[must_use]
    pub fn factor(&self, from: CommodityGuid, to: CommodityGuid) -> Option<Decimal> {
        if let Some(direct) = self.quote(from, to) {
            return Some(direct.value);
        }
        self.quote(to, from).and_then(Price::inverse_value)
    }

    /// Prices of `commodity` in any currency, newest first.
    #[must_use]
    pub fn prices_of(&self, commodity: CommodityGuid) -> Vec<&Price> {
        let mut prices: Vec<&Price> = self
            .prices
            .iter()
            .filter(|price| price.commodity == commodity)
            .collect();
        prices.sort_by(|a, b| b.date.cmp(&a.date));
        prices
    }

    /// Most recent price of `commodity` in any currency.
    #[must_use]
    pub fn latest_of(&self, commodity: CommodityGuid) -> Option<&Price> {
        latest_price(self.prices.iter().filter(|price| price.commodity == commodity))
    }
}
