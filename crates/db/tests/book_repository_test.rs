//! Loader tests against GnuCash SQLite books created on the fly.

use std::str::FromStr;

use cashview_core::balance::Balanceable;
use cashview_core::book::{AccountType, Book};
use cashview_db::{BookRepository, LoadError, connect};
use cashview_shared::config::LedgerConfig;
use cashview_shared::types::TransactionGuid;
use rust_decimal_macros::dec;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

const SCHEMA: &str = include_str!("fixtures/gnucash_schema.sql");
const HOUSEHOLD: &str = include_str!("fixtures/household_book.sql");

/// In-memory databases live as long as their single connection.
async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

async fn household_pool() -> SqlitePool {
    let pool = memory_pool().await;
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    sqlx::raw_sql(HOUSEHOLD).execute(&pool).await.unwrap();
    pool
}

async fn load_household() -> Book {
    BookRepository::new(household_pool().await)
        .load()
        .await
        .expect("Household book should load")
}

// ============================================================================
// Loading a well-formed book
// ============================================================================

#[tokio::test]
async fn test_load_account_tree() {
    let book = load_household().await;

    let fullnames: Vec<&str> = book.accounts().map(|a| a.fullname()).collect();
    assert_eq!(
        fullnames,
        vec![
            "",
            "Assets",
            "Assets:Brokerage",
            "Assets:Checking Account",
            "Assets:Loyalty",
            "Income",
        ]
    );

    let assets = book.account_by_fullname("Assets").unwrap();
    assert!(assets.placeholder());
    assert_eq!(assets.description(), "Everything owned");

    let loyalty = book.account_by_fullname("Assets:Loyalty").unwrap();
    assert!(loyalty.hidden());
    assert_eq!(loyalty.account_type(), AccountType::Asset);
    assert_eq!(loyalty.commodity().mnemonic, "POINTS");
}

#[tokio::test]
async fn test_load_uses_split_quantity() {
    let book = load_household().await;
    let brokerage = book.account_by_fullname("Assets:Brokerage").unwrap();

    let split = brokerage.splits().next().unwrap();
    assert_eq!(split.value, dec!(10));
    assert_eq!(split.memo, "10 shares");
}

#[tokio::test]
async fn test_load_prices_latest_wins() {
    let book = load_household().await;
    let aapl = book.find_commodity("NASDAQ", "AAPL").unwrap().guid;

    let latest = book.latest_price(aapl).unwrap();
    assert_eq!(latest.value, dec!(160));
    assert_eq!(latest.source, "Finance::Quote");
    assert_eq!(book.prices_of(aapl).len(), 2);
}

#[tokio::test]
async fn test_load_both_timestamp_layouts() {
    let book = load_household().await;
    let salary = TransactionGuid::from_str("70000000000000000000000000000001").unwrap();
    let purchase = TransactionGuid::from_str("70000000000000000000000000000002").unwrap();

    let salary = book.transaction(salary).unwrap();
    let purchase = book.transaction(purchase).unwrap();
    assert_eq!(salary.post_date.to_string(), "2024-01-15 10:59:00");
    assert_eq!(purchase.post_date.to_string(), "2024-02-01 10:59:00");
    assert_eq!(purchase.num, "42");
}

#[tokio::test]
async fn test_load_skips_template_tree() {
    let book = load_household().await;
    let rent = TransactionGuid::from_str("70000000000000000000000000000004").unwrap();

    assert_eq!(book.account_count(), 6);
    assert!(book.account_by_fullname("Rent").is_err());
    assert!(book.transaction(rent).is_none());
    assert_eq!(book.transactions().len(), 3);
}

#[tokio::test]
async fn test_safe_balances_of_loaded_book() {
    let book = load_household().await;
    let assets = book.account_by_fullname("Assets").unwrap();

    assert!(assets.get_balance().is_err());
    // 1000 checking + 10 * 160 shares, points left out
    assert_eq!(assets.safe_balance(), dec!(2600));
    assert_eq!(book.root().safe_balance(), dec!(100));
    assert_eq!(
        book.account_by_fullname("Assets:Checking Account")
            .unwrap()
            .safe_balance(),
        dec!(1000)
    );
}

#[tokio::test]
async fn test_ledger_of_loaded_account() {
    let book = load_household().await;
    let checking = book.account_by_fullname("Assets:Checking Account").unwrap();

    let page = checking
        .ledger(LedgerConfig::default().page_request(1))
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].description, "Buy AAPL");
    assert_eq!(page.data[0].running_balance, dec!(1000));
    assert_eq!(page.data[1].running_balance, dec!(2500));
}

// ============================================================================
// Malformed books
// ============================================================================

#[tokio::test]
async fn test_empty_books_table() {
    let pool = memory_pool().await;
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    let result = BookRepository::new(pool).load().await;
    assert!(matches!(result, Err(LoadError::MissingBook)));
}

#[tokio::test]
async fn test_zero_denominator_is_invalid_row() {
    let pool = household_pool().await;
    sqlx::query("UPDATE splits SET quantity_denom = 0 WHERE guid = ?")
        .bind("50000000000000000000000000000001")
        .execute(&pool)
        .await
        .unwrap();

    let result = BookRepository::new(pool).load().await;
    assert!(matches!(
        result,
        Err(LoadError::InvalidRow { table: "splits", ref guid, .. })
            if guid == "50000000000000000000000000000001"
    ));
}

#[tokio::test]
async fn test_unknown_account_type_is_invalid_row() {
    let pool = household_pool().await;
    sqlx::query("UPDATE accounts SET account_type = 'SAVINGS' WHERE name = 'Loyalty'")
        .execute(&pool)
        .await
        .unwrap();

    let result = BookRepository::new(pool).load().await;
    assert!(matches!(
        result,
        Err(LoadError::InvalidRow { table: "accounts", .. })
    ));
}

#[tokio::test]
async fn test_malformed_post_date_is_invalid_row() {
    let pool = household_pool().await;
    sqlx::query("UPDATE transactions SET post_date = 'last tuesday' WHERE description = 'Salary'")
        .execute(&pool)
        .await
        .unwrap();

    let result = BookRepository::new(pool).load().await;
    assert!(matches!(
        result,
        Err(LoadError::InvalidRow { table: "transactions", .. })
    ));
}

#[tokio::test]
async fn test_dangling_parent_is_book_error() {
    let pool = household_pool().await;
    sqlx::query("UPDATE accounts SET parent_guid = ? WHERE name = 'Income'")
        .bind("a00000000000000000000000000000ff")
        .execute(&pool)
        .await
        .unwrap();

    let result = BookRepository::new(pool).load().await;
    assert!(matches!(result, Err(LoadError::Book(_))));
}

// ============================================================================
// Connecting to files
// ============================================================================

#[tokio::test]
async fn test_connect_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.gnucash");

    assert!(connect(&path, true).await.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_connect_read_only_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("household.gnucash");

    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&path)
                .journal_mode(SqliteJournalMode::Delete)
                .create_if_missing(true),
        )
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA).execute(&writer).await.unwrap();
    sqlx::raw_sql(HOUSEHOLD).execute(&writer).await.unwrap();
    writer.close().await;

    let pool = connect(&path, true).await.unwrap();
    let book = BookRepository::new(pool.clone()).load().await.unwrap();
    assert_eq!(book.root().safe_balance(), dec!(100));

    let write = sqlx::query("DELETE FROM prices").execute(&pool).await;
    assert!(write.is_err(), "Read-only pool must reject writes");
}
