//! Safe balance report rows and their text rendering.

use std::fmt::Write as _;

use cashview_core::book::Book;
use rust_decimal::Decimal;
use serde::Serialize;

/// One account line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Account name.
    pub name: String,
    /// Full account name, empty for the root.
    pub fullname: String,
    /// Distance from the root.
    pub depth: usize,
    /// Safe balance in the account's commodity.
    pub balance: Decimal,
    /// Mnemonic of the account's commodity.
    pub commodity: String,
}

/// Every account of `book`, depth-first, with its safe balance.
pub fn report_rows(book: &Book) -> Vec<ReportRow> {
    book.accounts()
        .map(|account| ReportRow {
            name: account.name().to_string(),
            fullname: account.fullname().to_string(),
            depth: account.depth(),
            balance: account.safe_balance(),
            commodity: account.commodity().mnemonic.clone(),
        })
        .collect()
}

/// Renders rows as an indented tree, two spaces per level.
pub fn render_text(rows: &[ReportRow]) -> String {
    let width = rows
        .iter()
        .map(|row| row.depth * 2 + row.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let label = format!("{:indent$}{}", "", row.name, indent = row.depth * 2);
        let _ = writeln!(
            out,
            "{label:<width$}  {:>14} {}",
            row.balance.to_string(),
            row.commodity
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashview_core::book::{Account, AccountType, BookBuilder, Split, Transaction};
    use cashview_core::commodity::Commodity;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn small_book() -> Book {
        let mut builder = BookBuilder::new();
        let eur = builder.add_commodity(Commodity::currency("EUR"));
        let gold = builder.add_commodity(Commodity::new("METAL", "XAU"));
        let root = builder.add_account(Account::new("Root Account", AccountType::Root, eur, None));
        let assets = builder.add_account(Account::new("Assets", AccountType::Asset, eur, Some(root)));
        let cash = builder.add_account(Account::new("Cash", AccountType::Cash, eur, Some(assets)));
        let vault = builder.add_account(Account::new("Vault", AccountType::Asset, gold, Some(assets)));

        let date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let txn = builder.add_transaction(Transaction::new(eur, date, "Opening"));
        builder.add_split(Split::new(txn, cash, dec!(25.50)));
        builder.add_split(Split::new(txn, vault, dec!(2)));

        builder.build(root).unwrap()
    }

    #[test]
    fn test_report_rows() {
        let rows = report_rows(&small_book());

        let summary: Vec<(&str, usize, Decimal, &str)> = rows
            .iter()
            .map(|r| (r.fullname.as_str(), r.depth, r.balance, r.commodity.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("", 0, dec!(25.50), "EUR"),
                ("Assets", 1, dec!(25.50), "EUR"),
                ("Assets:Cash", 2, dec!(25.50), "EUR"),
                ("Assets:Vault", 2, dec!(2), "XAU"),
            ]
        );
    }

    #[test]
    fn test_render_text_indents_by_depth() {
        let text = render_text(&report_rows(&small_book()));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Root Account"));
        assert!(lines[1].starts_with("  Assets"));
        assert!(lines[2].starts_with("    Cash"));
        assert!(lines[3].ends_with("2 XAU"));
    }

    #[test]
    fn test_rows_serialize_balances_as_strings() {
        let rows = report_rows(&small_book());
        let json = serde_json::to_value(&rows[2]).unwrap();

        assert_eq!(json["fullname"], "Assets:Cash");
        assert_eq!(json["balance"], "25.50");
        assert_eq!(json["commodity"], "EUR");
    }
}
