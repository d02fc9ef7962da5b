//! In-memory book snapshot and its queries.

use std::collections::HashMap;

use cashview_shared::types::{AccountGuid, CommodityGuid, TransactionGuid};
use rust_decimal::Decimal;

use super::error::BookError;
use super::node::AccountNode;
use super::types::{Account, Split, Transaction};
use crate::commodity::{Commodity, ConversionError, CurrencyConversion, Price, PriceDb};

/// An account plus what the snapshot derives from the tree.
#[derive(Debug, Clone)]
pub(crate) struct AccountEntry {
    pub(crate) account: Account,
    pub(crate) commodity: usize,
    pub(crate) fullname: String,
    pub(crate) depth: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) splits: Vec<usize>,
}

/// Immutable snapshot of a GnuCash book.
///
/// Built by [`BookBuilder`](super::BookBuilder). Accounts are stored in
/// depth-first pre-order from the root, children in name order, so the root
/// is always the first account.
#[derive(Debug, Clone)]
pub struct Book {
    pub(crate) commodities: Vec<Commodity>,
    pub(crate) commodity_index: HashMap<CommodityGuid, usize>,
    pub(crate) accounts: Vec<AccountEntry>,
    pub(crate) account_index: HashMap<AccountGuid, usize>,
    pub(crate) fullname_index: HashMap<String, usize>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: HashMap<TransactionGuid, usize>,
    pub(crate) splits: Vec<Split>,
    pub(crate) prices: PriceDb,
}

impl Book {
    /// The root account.
    #[must_use]
    pub fn root(&self) -> AccountNode<'_> {
        AccountNode::new(self, 0)
    }

    /// Looks up an account by GUID.
    #[must_use]
    pub fn account(&self, guid: AccountGuid) -> Option<AccountNode<'_>> {
        self.account_index
            .get(&guid)
            .map(|idx| AccountNode::new(self, *idx))
    }

    /// Looks up an account by `:`-separated full name.
    ///
    /// The empty name denotes the root account.
    pub fn account_by_fullname(&self, fullname: &str) -> Result<AccountNode<'_>, BookError> {
        self.fullname_index
            .get(fullname)
            .map(|idx| AccountNode::new(self, *idx))
            .ok_or_else(|| BookError::AccountNotFound(fullname.to_string()))
    }

    /// Every account, depth-first from the root.
    pub fn accounts(&self) -> impl Iterator<Item = AccountNode<'_>> {
        (0..self.accounts.len()).map(move |idx| AccountNode::new(self, idx))
    }

    /// Number of accounts, root included.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Commodities sorted by namespace, then mnemonic.
    #[must_use]
    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    /// Looks up a commodity by GUID.
    #[must_use]
    pub fn commodity(&self, guid: CommodityGuid) -> Option<&Commodity> {
        self.commodity_index
            .get(&guid)
            .map(|idx| &self.commodities[*idx])
    }

    /// Looks up a commodity by namespace and mnemonic.
    #[must_use]
    pub fn find_commodity(&self, namespace: &str, mnemonic: &str) -> Option<&Commodity> {
        self.commodities
            .iter()
            .find(|c| c.namespace == namespace && c.mnemonic == mnemonic)
    }

    /// All prices of the book.
    #[must_use]
    pub fn prices(&self) -> &PriceDb {
        &self.prices
    }

    /// Most recent price of `commodity` in any currency.
    #[must_use]
    pub fn latest_price(&self, commodity: CommodityGuid) -> Option<&Price> {
        self.prices.latest_of(commodity)
    }

    /// Prices of `commodity`, newest first.
    #[must_use]
    pub fn prices_of(&self, commodity: CommodityGuid) -> Vec<&Price> {
        self.prices.prices_of(commodity)
    }

    /// Looks up a transaction by GUID.
    #[must_use]
    pub fn transaction(&self, guid: TransactionGuid) -> Option<&Transaction> {
        self.transaction_index
            .get(&guid)
            .map(|idx| &self.transactions[*idx])
    }

    /// Transactions with at least one split in the account tree.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn display_name(&self, guid: CommodityGuid) -> String {
        self.commodity(guid)
            .map_or_else(|| guid.to_string(), |c| c.mnemonic.clone())
    }
}

impl CurrencyConversion for Book {
    type Commodity = CommodityGuid;

    fn currency_conversion(
        &self,
        from: &CommodityGuid,
        to: &CommodityGuid,
    ) -> Result<Decimal, ConversionError> {
        self.prices.factor(*from, *to).ok_or_else(|| {
            ConversionError::new(self.display_name(*from), self.display_name(*to))
        })
    }
}
