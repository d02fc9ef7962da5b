//! Balances that never fail on missing price data.
//!
//! Books routinely mix currencies with units nobody prices (loyalty points,
//! delisted securities). One such leaf makes the whole-subtree balance fail,
//! so when that happens the subtree is summed by hand, level by level,
//! leaving out only the children whose commodity cannot be related to their
//! parent's.

use rust_decimal::Decimal;
use tracing::debug;

use super::Balanceable;
use crate::commodity::CurrencyConversion;

/// Total of `account` and its descendants in the account's commodity.
///
/// Returns `get_balance` unchanged when it succeeds. Otherwise sums the
/// account's own splits plus, for every child, `safe_balance(child)` times the
/// child-to-parent conversion factor. A child in the parent's commodity uses a
/// factor of exactly 1 without consulting `rates`; a child whose factor is
/// unavailable contributes nothing.
pub fn safe_balance<B, C>(account: &B, rates: &C) -> Decimal
where
    B: Balanceable,
    C: CurrencyConversion<Commodity = B::Commodity> + ?Sized,
{
    match account.get_balance() {
        Ok(balance) => balance,
        Err(err) => {
            debug!(error = %err, "subtree balance unavailable, summing convertible branches");
            fallback_balance(account, rates)
        }
    }
}

fn fallback_balance<B, C>(account: &B, rates: &C) -> Decimal
where
    B: Balanceable,
    C: CurrencyConversion<Commodity = B::Commodity> + ?Sized,
{
    let commodity = account.commodity();
    let mut total: Decimal = account.split_values().sum();

    for child in account.children() {
        let child_commodity = child.commodity();
        let factor = if child_commodity == commodity {
            Decimal::ONE
        } else {
            match rates.currency_conversion(&child_commodity, &commodity) {
                Ok(factor) => factor,
                Err(err) => {
                    debug!(error = %err, "leaving inconvertible branch out of balance");
                    continue;
                }
            }
        };
        total += safe_balance(&child, rates) * factor;
    }

    total
}
