//! Ledger entry domain types.

use cashview_shared::types::{SplitGuid, TransactionGuid};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::book::{Split, Transaction};

/// A single line of an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The split shown on this line.
    pub split: SplitGuid,
    /// The transaction the split belongs to.
    pub transaction: TransactionGuid,
    /// Transaction posting date.
    pub post_date: NaiveDateTime,
    /// Transaction number.
    pub num: String,
    /// Transaction description.
    pub description: String,
    /// Split memo.
    pub memo: String,
    /// Split value in the account's commodity.
    pub value: Decimal,
    /// Sum of the account's own split values up to and including this one.
    pub running_balance: Decimal,
}

impl LedgerEntry {
    /// Creates the line for `split`.
    #[must_use]
    pub fn new(split: &Split, transaction: &Transaction, running_balance: Decimal) -> Self {
        Self {
            split: split.guid,
            transaction: transaction.guid,
            post_date: transaction.post_date,
            num: transaction.num.clone(),
            description: transaction.description.clone(),
            memo: split.memo.clone(),
            value: split.value,
            running_balance,
        }
    }
}
