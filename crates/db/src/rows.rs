//! Raw rows of the GnuCash SQL schema and their conversion into book records.

use std::fmt::Display;
use std::str::FromStr;

use cashview_core::book::{Account, AccountType, Split, Transaction};
use cashview_core::commodity::{Commodity, Price};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::error::LoadError;

/// Timestamp layouts written by GnuCash, current first.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y%m%d%H%M%S"];

#[derive(Debug, Clone, FromRow)]
pub(crate) struct BookRow {
    pub(crate) guid: String,
    pub(crate) root_account_guid: String,
    pub(crate) root_template_guid: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct CommodityRow {
    pub(crate) guid: String,
    pub(crate) namespace: String,
    pub(crate) mnemonic: String,
    pub(crate) fullname: Option<String>,
    pub(crate) fraction: i64,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct AccountRow {
    pub(crate) guid: String,
    pub(crate) name: String,
    pub(crate) account_type: String,
    pub(crate) commodity_guid: Option<String>,
    pub(crate) parent_guid: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) hidden: Option<i64>,
    pub(crate) placeholder: Option<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct TransactionRow {
    pub(crate) guid: String,
    pub(crate) currency_guid: String,
    pub(crate) num: String,
    pub(crate) post_date: Option<String>,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct SplitRow {
    pub(crate) guid: String,
    pub(crate) tx_guid: String,
    pub(crate) account_guid: String,
    pub(crate) memo: String,
    pub(crate) quantity_num: i64,
    pub(crate) quantity_denom: i64,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct PriceRow {
    pub(crate) guid: String,
    pub(crate) commodity_guid: String,
    pub(crate) currency_guid: String,
    pub(crate) date: String,
    pub(crate) source: Option<String>,
    pub(crate) value_num: i64,
    pub(crate) value_denom: i64,
}

impl CommodityRow {
    pub(crate) fn into_commodity(self) -> Result<Commodity, LoadError> {
        Ok(Commodity {
            guid: parse_guid("commodities", &self.guid, &self.guid)?,
            namespace: self.namespace,
            mnemonic: self.mnemonic,
            fullname: self.fullname.unwrap_or_default(),
            fraction: self.fraction,
        })
    }
}

impl AccountRow {
    pub(crate) fn into_account(self) -> Result<Account, LoadError> {
        const TABLE: &str = "accounts";

        let account_type = AccountType::from_str(&self.account_type)
            .map_err(|reason| LoadError::invalid_row(TABLE, &self.guid, reason))?;
        let commodity = self
            .commodity_guid
            .as_deref()
            .ok_or_else(|| LoadError::invalid_row(TABLE, &self.guid, "account has no commodity"))?;

        Ok(Account {
            guid: parse_guid(TABLE, &self.guid, &self.guid)?,
            commodity: parse_guid(TABLE, &self.guid, commodity)?,
            parent: self
                .parent_guid
                .as_deref()
                .map(|parent| parse_guid(TABLE, &self.guid, parent))
                .transpose()?,
            name: self.name,
            account_type,
            description: self.description.unwrap_or_default(),
            placeholder: self.placeholder.unwrap_or(0) != 0,
            hidden: self.hidden.unwrap_or(0) != 0,
        })
    }
}

impl TransactionRow {
    pub(crate) fn into_transaction(self) -> Result<Transaction, LoadError> {
        const TABLE: &str = "transactions";

        let post_date = self
            .post_date
            .as_deref()
            .ok_or_else(|| LoadError::invalid_row(TABLE, &self.guid, "missing post date"))?;

        Ok(Transaction {
            guid: parse_guid(TABLE, &self.guid, &self.guid)?,
            currency: parse_guid(TABLE, &self.guid, &self.currency_guid)?,
            post_date: parse_timestamp(TABLE, &self.guid, post_date)?,
            num: self.num,
            description: self.description.unwrap_or_default(),
        })
    }
}

impl SplitRow {
    pub(crate) fn into_split(self) -> Result<Split, LoadError> {
        const TABLE: &str = "splits";

        Ok(Split {
            guid: parse_guid(TABLE, &self.guid, &self.guid)?,
            transaction: parse_guid(TABLE, &self.guid, &self.tx_guid)?,
            account: parse_guid(TABLE, &self.guid, &self.account_guid)?,
            value: rational(TABLE, &self.guid, self.quantity_num, self.quantity_denom)?,
            memo: self.memo,
        })
    }
}

impl PriceRow {
    pub(crate) fn into_price(self) -> Result<Price, LoadError> {
        const TABLE: &str = "prices";

        Ok(Price {
            guid: parse_guid(TABLE, &self.guid, &self.guid)?,
            commodity: parse_guid(TABLE, &self.guid, &self.commodity_guid)?,
            currency: parse_guid(TABLE, &self.guid, &self.currency_guid)?,
            date: parse_timestamp(TABLE, &self.guid, &self.date)?,
            value: rational(TABLE, &self.guid, self.value_num, self.value_denom)?,
            source: self.source.unwrap_or_default(),
        })
    }
}

/// Parses a GUID column of the row identified by `row`.
pub(crate) fn parse_guid<G>(table: &'static str, row: &str, raw: &str) -> Result<G, LoadError>
where
    G: FromStr,
    G::Err: Display,
{
    raw.parse()
        .map_err(|e| LoadError::invalid_row(table, row, format!("invalid GUID {raw:?}: {e}")))
}

/// Exact value of the fraction `num / denom`.
pub(crate) fn rational(
    table: &'static str,
    row: &str,
    num: i64,
    denom: i64,
) -> Result<Decimal, LoadError> {
    Decimal::from(num)
        .checked_div(Decimal::from(denom))
        .ok_or_else(|| LoadError::invalid_row(table, row, format!("cannot divide {num} by {denom}")))
}

/// Parses a GnuCash timestamp in either stored layout.
pub(crate) fn parse_timestamp(
    table: &'static str,
    row: &str,
    raw: &str,
) -> Result<NaiveDateTime, LoadError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| LoadError::invalid_row(table, row, format!("invalid timestamp {raw:?}")))
}
