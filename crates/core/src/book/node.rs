//! Borrowed view of one account inside a book.

use cashview_shared::types::{AccountGuid, CommodityGuid};
use rust_decimal::Decimal;

use super::snapshot::{AccountEntry, Book};
use super::types::{Account, AccountType, Split};
use crate::balance::{self, Balanceable};
use crate::commodity::{Commodity, ConversionError, CurrencyConversion};

/// An account together with the book it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct AccountNode<'a> {
    book: &'a Book,
    idx: usize,
}

impl<'a> AccountNode<'a> {
    pub(crate) const fn new(book: &'a Book, idx: usize) -> Self {
        Self { book, idx }
    }

    fn entry(&self) -> &'a AccountEntry {
        &self.book.accounts[self.idx]
    }

    /// The book this account belongs to.
    #[must_use]
    pub fn book(&self) -> &'a Book {
        self.book
    }

    /// The account row.
    #[must_use]
    pub fn account(&self) -> &'a Account {
        &self.entry().account
    }

    /// Account GUID.
    #[must_use]
    pub fn guid(&self) -> AccountGuid {
        self.entry().account.guid
    }

    /// Account name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.entry().account.name
    }

    /// Names from below the root down to this account, joined with `:`.
    #[must_use]
    pub fn fullname(&self) -> &'a str {
        &self.entry().fullname
    }

    /// Account type.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        self.entry().account.account_type
    }

    /// GUID of the account's commodity.
    #[must_use]
    pub fn commodity_guid(&self) -> CommodityGuid {
        self.entry().account.commodity
    }

    /// The account's commodity.
    #[must_use]
    pub fn commodity(&self) -> &'a Commodity {
        &self.book.commodities[self.entry().commodity]
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &'a str {
        &self.entry().account.description
    }

    /// True for accounts that only group other accounts.
    #[must_use]
    pub fn placeholder(&self) -> bool {
        self.entry().account.placeholder
    }

    /// True for accounts hidden by default.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.entry().account.hidden
    }

    /// Distance from the root (the root is at depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entry().depth
    }

    /// True for the root account.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.entry().parent.is_none()
    }

    /// Parent account, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<AccountNode<'a>> {
        let book = self.book;
        self.entry().parent.map(|idx| AccountNode::new(book, idx))
    }

    /// Direct sub-accounts in name order.
    pub fn children(&self) -> impl Iterator<Item = AccountNode<'a>> + use<'a> {
        let book = self.book;
        self.entry()
            .children
            .iter()
            .map(move |idx| AccountNode::new(book, *idx))
    }

    /// Splits posted directly to this account, oldest first.
    pub fn splits(&self) -> impl Iterator<Item = &'a Split> + use<'a> {
        let book = self.book;
        self.entry().splits.iter().map(move |idx| &book.splits[*idx])
    }

    /// Number of splits posted directly to this account.
    #[must_use]
    pub fn split_count(&self) -> usize {
        self.entry().splits.len()
    }

    /// Balance of the subtree expressed in `target`.
    ///
    /// Every account converts its own split total straight into `target`;
    /// the conversion is requested whenever the commodities differ, even for
    /// an account without splits. Fails on the first missing price.
    pub fn balance_in(&self, target: CommodityGuid) -> Result<Decimal, ConversionError> {
        let own: Decimal = self.splits().map(|split| split.value).sum();
        let commodity = self.commodity_guid();
        let mut balance = if commodity == target {
            own
        } else {
            own * self.book.currency_conversion(&commodity, &target)?
        };

        for child in self.children() {
            balance += child.balance_in(target)?;
        }

        Ok(balance)
    }

    /// Subtree balance that leaves out branches without price data.
    #[must_use]
    pub fn safe_balance(&self) -> Decimal {
        balance::safe_balance(self, self.book)
    }
}

impl<'a> Balanceable for AccountNode<'a> {
    type Commodity = CommodityGuid;

    fn commodity(&self) -> CommodityGuid {
        self.commodity_guid()
    }

    fn split_values(&self) -> impl Iterator<Item = Decimal> {
        self.splits().map(|split| split.value)
    }

    fn children(&self) -> impl Iterator<Item = AccountNode<'a>> {
        AccountNode::children(self)
    }

    fn get_balance(&self) -> Result<Decimal, ConversionError> {
        self.balance_in(self.commodity_guid())
    }
}
