//! Book record types as stored by GnuCash.

use cashview_shared::types::{AccountGuid, CommodityGuid, SplitGuid, TransactionGuid};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GnuCash account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Top of an account tree.
    Root,
    /// Bank account.
    Bank,
    /// Cash in wallet.
    Cash,
    /// Generic asset.
    Asset,
    /// Credit card.
    Credit,
    /// Generic liability.
    Liability,
    /// Individual stock.
    Stock,
    /// Mutual fund.
    Mutual,
    /// Currency trading account (legacy).
    Currency,
    /// Income.
    Income,
    /// Expense.
    Expense,
    /// Equity.
    Equity,
    /// Accounts receivable.
    Receivable,
    /// Accounts payable.
    Payable,
    /// Trading account.
    Trading,
}

impl AccountType {
    /// The name GnuCash stores for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Bank => "BANK",
            Self::Cash => "CASH",
            Self::Asset => "ASSET",
            Self::Credit => "CREDIT",
            Self::Liability => "LIABILITY",
            Self::Stock => "STOCK",
            Self::Mutual => "MUTUAL",
            Self::Currency => "CURRENCY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Equity => "EQUITY",
            Self::Receivable => "RECEIVABLE",
            Self::Payable => "PAYABLE",
            Self::Trading => "TRADING",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ROOT" => Ok(Self::Root),
            "BANK" => Ok(Self::Bank),
            "CASH" => Ok(Self::Cash),
            "ASSET" => Ok(Self::Asset),
            "CREDIT" => Ok(Self::Credit),
            "LIABILITY" => Ok(Self::Liability),
            "STOCK" => Ok(Self::Stock),
            "MUTUAL" => Ok(Self::Mutual),
            "CURRENCY" => Ok(Self::Currency),
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            "EQUITY" => Ok(Self::Equity),
            "RECEIVABLE" => Ok(Self::Receivable),
            "PAYABLE" => Ok(Self::Payable),
            "TRADING" => Ok(Self::Trading),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// An account row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account GUID.
    pub guid: AccountGuid,
    /// Name, unique among siblings in well-formed books.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Commodity the account is denominated in.
    pub commodity: CommodityGuid,
    /// Parent account, `None` for roots.
    pub parent: Option<AccountGuid>,
    /// Free-form description.
    pub description: String,
    /// Placeholder accounts only group other accounts.
    pub placeholder: bool,
    /// Hidden from account lists by default.
    pub hidden: bool,
}

impl Account {
    /// Creates a visible, non-placeholder account.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        account_type: AccountType,
        commodity: CommodityGuid,
        parent: Option<AccountGuid>,
    ) -> Self {
        Self {
            guid: AccountGuid::new(),
            name: name.into(),
            account_type,
            commodity,
            parent,
            description: String::new(),
            placeholder: false,
            hidden: false,
        }
    }
}

/// A transaction row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction GUID.
    pub guid: TransactionGuid,
    /// Transaction currency.
    pub currency: CommodityGuid,
    /// Posting date.
    pub post_date: NaiveDateTime,
    /// Check or reference number.
    pub num: String,
    /// Description.
    pub description: String,
}

impl Transaction {
    /// Creates a transaction without a number.
    #[must_use]
    pub fn new(
        currency: CommodityGuid,
        post_date: NaiveDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            guid: TransactionGuid::new(),
            currency,
            post_date,
            num: String::new(),
            description: description.into(),
        }
    }
}

/// A posting of one transaction to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Split GUID.
    pub guid: SplitGuid,
    /// Owning transaction.
    pub transaction: TransactionGuid,
    /// Account posted to.
    pub account: AccountGuid,
    /// Memo.
    pub memo: String,
    /// Signed amount in the account's commodity (GnuCash's split quantity).
    pub value: Decimal,
}

impl Split {
    /// Creates a split without memo.
    #[must_use]
    pub fn new(transaction: TransactionGuid, account: AccountGuid, value: Decimal) -> Self {
        Self {
            guid: SplitGuid::new(),
            transaction,
            account,
            memo: String::new(),
            value,
        }
    }
}
