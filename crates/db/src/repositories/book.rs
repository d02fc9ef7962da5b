//! Book repository: reads a whole GnuCash book into memory.

use std::collections::HashSet;

use cashview_core::book::{Book, BookBuilder};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::rows::{
    AccountRow, BookRow, CommodityRow, PriceRow, SplitRow, TransactionRow, parse_guid,
};

const BOOK_QUERY: &str = "SELECT guid, root_account_guid, root_template_guid FROM books LIMIT 1";
const COMMODITIES_QUERY: &str =
    "SELECT guid, namespace, mnemonic, fullname, fraction FROM commodities";
const ACCOUNTS_QUERY: &str = "SELECT guid, name, account_type, commodity_guid, parent_guid, \
     description, hidden, placeholder FROM accounts";
const TRANSACTIONS_QUERY: &str =
    "SELECT guid, currency_guid, num, post_date, description FROM transactions";
const SPLITS_QUERY: &str =
    "SELECT guid, tx_guid, account_guid, memo, quantity_num, quantity_denom FROM splits";
const PRICES_QUERY: &str = "SELECT guid, commodity_guid, currency_guid, date, source, \
     value_num, value_denom FROM prices";

/// Book repository for loading snapshots.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new book repository.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reads every table of the book and builds the snapshot.
    ///
    /// The scheduled-transaction template tree is skipped together with its
    /// splits.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A query fails or the `books` table is empty
    /// - A row holds a malformed GUID, number, date or account type
    /// - The rows do not form a valid account tree
    pub async fn load(&self) -> Result<Book, LoadError> {
        let book: BookRow = sqlx::query_as(BOOK_QUERY)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(LoadError::MissingBook)?;
        debug!(book = %book.guid, root = %book.root_account_guid, "loading book");

        let commodities: Vec<CommodityRow> =
            sqlx::query_as(COMMODITIES_QUERY).fetch_all(&self.pool).await?;
        let accounts: Vec<AccountRow> = sqlx::query_as(ACCOUNTS_QUERY).fetch_all(&self.pool).await?;
        let transactions: Vec<TransactionRow> =
            sqlx::query_as(TRANSACTIONS_QUERY).fetch_all(&self.pool).await?;
        let splits: Vec<SplitRow> = sqlx::query_as(SPLITS_QUERY).fetch_all(&self.pool).await?;
        let prices: Vec<PriceRow> = sqlx::query_as(PRICES_QUERY).fetch_all(&self.pool).await?;
        debug!(
            commodities = commodities.len(),
            accounts = accounts.len(),
            transactions = transactions.len(),
            splits = splits.len(),
            prices = prices.len(),
            "fetched book tables"
        );

        let template = template_tree(&accounts, book.root_template_guid.as_deref());
        if !template.is_empty() {
            debug!(accounts = template.len(), "skipping template accounts");
        }

        let mut builder = BookBuilder::new();
        for row in commodities {
            builder.add_commodity(row.into_commodity()?);
        }
        for row in accounts {
            if !template.contains(&row.guid) {
                builder.add_account(row.into_account()?);
            }
        }
        for row in transactions {
            builder.add_transaction(row.into_transaction()?);
        }
        for row in splits {
            if !template.contains(&row.account_guid) {
                builder.add_split(row.into_split()?);
            }
        }
        for row in prices {
            builder.add_price(row.into_price()?);
        }

        let root = parse_guid("books", &book.guid, &book.root_account_guid)?;
        let snapshot = builder.build(root)?;

        info!(
            accounts = snapshot.account_count(),
            commodities = snapshot.commodities().len(),
            transactions = snapshot.transactions().len(),
            prices = snapshot.prices().len(),
            "book loaded"
        );

        Ok(snapshot)
    }
}

/// GUIDs of the template root and every account below it.
fn template_tree(accounts: &[AccountRow], template_root: Option<&str>) -> HashSet<String> {
    let mut tree = HashSet::new();
    let Some(template_root) = template_root else {
        return tree;
    };
    tree.insert(template_root.to_string());

    loop {
        let before = tree.len();
        for row in accounts {
            if let Some(parent) = &row.parent_guid
                && tree.contains(parent)
            {
                tree.insert(row.guid.clone());
            }
        }
        if tree.len() == before {
            return tree;
        }
    }
}
