//! Capability interface of a node in an account tree.

use rust_decimal::Decimal;

use crate::commodity::ConversionError;

/// An account node whose subtree can be totalled.
pub trait Balanceable: Sized {
    /// Commodity key, comparable for identity.
    type Commodity: PartialEq;

    /// The commodity the account is denominated in.
    fn commodity(&self) -> Self::Commodity;

    /// Values of the splits posted directly to this account, in its own
    /// commodity.
    fn split_values(&self) -> impl Iterator<Item = Decimal>;

    /// Direct sub-accounts.
    fn children(&self) -> impl Iterator<Item = Self>;

    /// Balance of the whole subtree in the account's commodity.
    ///
    /// Fails as soon as any descendant commodity cannot be converted.
    fn get_balance(&self) -> Result<Decimal, ConversionError>;
}
