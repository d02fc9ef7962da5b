//! Validating construction of book snapshots.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use cashview_shared::types::{
    AccountGuid, CommodityGuid, PriceGuid, SplitGuid, TransactionGuid,
};
use tracing::{debug, warn};

use super::error::BookError;
use super::snapshot::{AccountEntry, Book};
use super::types::{Account, Split, Transaction};
use crate::commodity::{Commodity, Price, PriceDb};

/// Collects book rows and turns them into a [`Book`].
#[derive(Debug, Clone, Default)]
pub struct BookBuilder {
    commodities: Vec<Commodity>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    splits: Vec<Split>,
    prices: Vec<Price>,
}

impl BookBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a commodity.
    pub fn add_commodity(&mut self, commodity: Commodity) -> CommodityGuid {
        let guid = commodity.guid;
        self.commodities.push(commodity);
        guid
    }

    /// Adds an account.
    pub fn add_account(&mut self, account: Account) -> AccountGuid {
        let guid = account.guid;
        self.accounts.push(account);
        guid
    }

    /// Adds a transaction.
    pub fn add_transaction(&mut self, transaction: Transaction) -> TransactionGuid {
        let guid = transaction.guid;
        self.transactions.push(transaction);
        guid
    }

    /// Adds a split.
    pub fn add_split(&mut self, split: Split) -> SplitGuid {
        let guid = split.guid;
        self.splits.push(split);
        guid
    }

    /// Adds a price.
    pub fn add_price(&mut self, price: Price) -> PriceGuid {
        let guid = price.guid;
        self.prices.push(price);
        guid
    }

    /// Validates the rows and builds the snapshot rooted at `root`.
    ///
    /// Accounts whose parent chain does not reach `root` (such as the
    /// template tree of scheduled transactions) are dropped together with
    /// their splits, and transactions left without splits go with them.
    pub fn build(self, root: AccountGuid) -> Result<Book, BookError> {
        let Self {
            mut commodities,
            accounts,
            transactions,
            splits,
            prices,
        } = self;

        commodities.sort_by(|a, b| {
            a.namespace
                .cmp(&b.namespace)
                .then_with(|| a.mnemonic.cmp(&b.mnemonic))
        });
        let commodity_index = index_unique(&commodities, |c| c.guid, "commodities")?;

        let raw_index = index_unique(&accounts, |a| a.guid, "accounts")?;
        for account in &accounts {
            if !commodity_index.contains_key(&account.commodity) {
                return Err(BookError::DanglingCommodity {
                    account: account.guid,
                    commodity: account.commodity,
                });
            }
            if let Some(parent) = account.parent
                && !raw_index.contains_key(&parent)
            {
                return Err(BookError::DanglingParent {
                    account: account.guid,
                    parent,
                });
            }
        }
        match raw_index.get(&root) {
            Some(idx) if accounts[*idx].parent.is_none() => {}
            _ => return Err(BookError::InvalidRoot(root)),
        }
        for account in &accounts {
            ensure_terminates(account, &accounts, &raw_index)?;
        }

        let entries = arrange_tree(&accounts, &raw_index, root, &commodity_index);
        let dropped = accounts.len() - entries.len();
        if dropped > 0 {
            warn!(dropped, "ignoring accounts outside the root account tree");
        }
        let account_index: HashMap<AccountGuid, usize> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.account.guid, idx))
            .collect();
        let mut fullname_index = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            fullname_index.entry(entry.fullname.clone()).or_insert(idx);
        }

        let raw_transactions = index_unique(&transactions, |t| t.guid, "transactions")?;
        index_unique(&splits, |s| s.guid, "splits")?;

        let mut entries = entries;
        let mut kept_splits = Vec::with_capacity(splits.len());
        let mut used_transactions: HashSet<TransactionGuid> = HashSet::new();
        for split in splits {
            if !raw_index.contains_key(&split.account) {
                return Err(BookError::DanglingSplitAccount {
                    split: split.guid,
                    account: split.account,
                });
            }
            if !raw_transactions.contains_key(&split.transaction) {
                return Err(BookError::DanglingSplitTransaction {
                    split: split.guid,
                    transaction: split.transaction,
                });
            }
            let Some(owner) = account_index.get(&split.account) else {
                debug!(split = %split.guid, "ignoring split outside the root account tree");
                continue;
            };
            used_transactions.insert(split.transaction);
            entries[*owner].splits.push(kept_splits.len());
            kept_splits.push(split);
        }

        let transactions: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| used_transactions.contains(&t.guid))
            .collect();
        let transaction_index: HashMap<TransactionGuid, usize> = transactions
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.guid, idx))
            .collect();

        for entry in &mut entries {
            entry.splits.sort_by(|a, b| {
                let (a, b) = (&kept_splits[*a], &kept_splits[*b]);
                let a_date = transactions[transaction_index[&a.transaction]].post_date;
                let b_date = transactions[transaction_index[&b.transaction]].post_date;
                a_date.cmp(&b_date).then_with(|| a.guid.cmp(&b.guid))
            });
        }

        for price in &prices {
            for commodity in [price.commodity, price.currency] {
                if !commodity_index.contains_key(&commodity) {
                    return Err(BookError::DanglingPrice {
                        price: price.guid,
                        commodity,
                    });
                }
            }
        }

        Ok(Book {
            commodities,
            commodity_index,
            accounts: entries,
            account_index,
            fullname_index,
            transactions,
            transaction_index,
            splits: kept_splits,
            prices: PriceDb::new(prices),
        })
    }
}

fn index_unique<T, K, F>(
    items: &[T],
    key: F,
    table: &'static str,
) -> Result<HashMap<K, usize>, BookError>
where
    K: Eq + Hash + Display,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let guid = key(item);
        if index.contains_key(&guid) {
            return Err(BookError::DuplicateGuid {
                table,
                guid: guid.to_string(),
            });
        }
        index.insert(guid, idx);
    }
    Ok(index)
}

/// Fails if following parent links from `account` never reaches a root.
fn ensure_terminates(
    account: &Account,
    accounts: &[Account],
    index: &HashMap<AccountGuid, usize>,
) -> Result<(), BookError> {
    let mut current = account.parent;
    for _ in 0..accounts.len() {
        match current {
            None => return Ok(()),
            Some(parent) => current = index.get(&parent).and_then(|idx| accounts[*idx].parent),
        }
    }
    if current.is_none() {
        Ok(())
    } else {
        Err(BookError::Cycle(account.guid))
    }
}

/// Lays out the tree under `root` in depth-first pre-order, children by name.
fn arrange_tree(
    accounts: &[Account],
    index: &HashMap<AccountGuid, usize>,
    root: AccountGuid,
    commodity_index: &HashMap<CommodityGuid, usize>,
) -> Vec<AccountEntry> {
    let mut children: HashMap<AccountGuid, Vec<usize>> = HashMap::new();
    for (idx, account) in accounts.iter().enumerate() {
        if let Some(parent) = account.parent {
            children.entry(parent).or_default().push(idx);
        }
    }
    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| {
            let (a, b) = (&accounts[*a], &accounts[*b]);
            a.name.cmp(&b.name).then_with(|| a.guid.cmp(&b.guid))
        });
    }

    let mut entries: Vec<AccountEntry> = Vec::with_capacity(accounts.len());
    // (account row, parent entry)
    let mut stack: Vec<(usize, Option<usize>)> = vec![(index[&root], None)];

    while let Some((raw, parent)) = stack.pop() {
        let account = &accounts[raw];
        let (fullname, depth) = match parent {
            None => (String::new(), 0),
            Some(p) if entries[p].depth == 0 => (account.name.clone(), 1),
            Some(p) => (
                format!("{}:{}", entries[p].fullname, account.name),
                entries[p].depth + 1,
            ),
        };

        let idx = entries.len();
        if let Some(p) = parent {
            entries[p].children.push(idx);
        }
        entries.push(AccountEntry {
            account: account.clone(),
            commodity: commodity_index[&account.commodity],
            fullname,
            depth,
            parent,
            children: Vec::new(),
            splits: Vec::new(),
        });

        if let Some(siblings) = children.get(&account.guid) {
            stack.extend(siblings.iter().rev().map(|child| (*child, Some(idx))));
        }
    }

    entries
}
