//! Paging through the splits of one account.

use cashview_shared::types::{AccountGuid, PageError, PageRequest, PageResponse};
use rust_decimal::Decimal;

use super::entry::LedgerEntry;
use super::error::LedgerError;
use crate::book::{AccountNode, Book, BookError};

/// Returns one page of the splits posted directly to `account`.
///
/// Entries are newest first. The running balance is accumulated oldest
/// first, so the first entry of page 1 carries the account's own total.
pub fn account_ledger(
    account: AccountNode<'_>,
    request: PageRequest,
) -> Result<PageResponse<LedgerEntry>, PageError> {
    let total = u64::try_from(account.split_count()).unwrap_or(u64::MAX);
    request.validate(total)?;

    let book = account.book();
    let mut running = Decimal::ZERO;
    let mut entries: Vec<LedgerEntry> = account
        .splits()
        .filter_map(|split| {
            running += split.value;
            book.transaction(split.transaction)
                .map(|transaction| LedgerEntry::new(split, transaction, running))
        })
        .collect();
    entries.reverse();

    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let data = entries.into_iter().skip(offset).take(limit).collect();

    Ok(PageResponse::new(data, request.page, request.per_page, total))
}

impl AccountNode<'_> {
    /// One page of this account's ledger.
    pub fn ledger(&self, request: PageRequest) -> Result<PageResponse<LedgerEntry>, PageError> {
        account_ledger(*self, request)
    }
}

impl Book {
    /// One page of the ledger of the account with this GUID.
    pub fn account_ledger(
        &self,
        guid: AccountGuid,
        request: PageRequest,
    ) -> Result<PageResponse<LedgerEntry>, LedgerError> {
        let account = self.account(guid).ok_or(BookError::UnknownAccount(guid))?;
        Ok(account.ledger(request)?)
    }
}
